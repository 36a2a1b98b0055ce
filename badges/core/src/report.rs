/// Place a packet into an output report of `report_len` bytes.
///
/// Byte 0 is the report id and always zero; the packet starts at byte 1 and is
/// cut off at `report_len - 1` bytes. Unused trailing bytes stay zero.
pub fn frame_report(payload: &[u8], report_len: usize) -> Vec<u8> {
    let mut report = vec![0u8; report_len];
    if report_len == 0 {
        return report;
    }
    let len = payload.len().min(report_len - 1);
    report[1..1 + len].copy_from_slice(&payload[..len]);
    report
}
