//! Core Badge trait and related types.

use std::time::Duration;

use tracing::{debug, info};

use crate::report::frame_report;
use crate::{BadgeError, Result};

/// Static information about a badge type for detection and CLI
#[derive(Debug, Clone, Copy)]
pub struct BadgeInfo {
    pub name: &'static str,
    pub cli_name: &'static str,
    pub vendor_id: u16,
    pub product_id: u16,
    /// Output report length including the leading report id byte
    pub report_length: usize,
}

/// Core badge trait - object-safe for `dyn Badge`
///
/// Badges should provide a static `INFO` constant and `open()` method separately.
pub trait Badge {
    /// Get badge info (instance method for object safety)
    fn info(&self) -> &'static BadgeInfo;

    /// Write one already framed output report
    fn write_report(&mut self, report: &[u8]) -> Result<()>;

    /// Send a header packet followed by the data packets, in order.
    ///
    /// `pacing` is slept between reports when non-zero. `progress` receives
    /// `(sent, total)` after each data packet.
    fn upload(
        &mut self,
        header: &[u8],
        packets: &[Vec<u8>],
        pacing: Duration,
        progress: &mut dyn FnMut(usize, usize),
    ) -> Result<()> {
        let report_len = self.info().report_length;
        if report_len < 2 {
            return Err(BadgeError::InvalidReportLength(report_len));
        }

        info!(
            badge = self.info().name,
            packets = packets.len(),
            "uploading message"
        );
        self.write_report(&frame_report(header, report_len))?;

        let total = packets.len();
        for (i, packet) in packets.iter().enumerate() {
            if !pacing.is_zero() {
                std::thread::sleep(pacing);
            }
            debug!(index = i, len = packet.len(), "sending data packet");
            self.write_report(&frame_report(packet, report_len))?;
            progress(i + 1, total);
        }
        Ok(())
    }
}
