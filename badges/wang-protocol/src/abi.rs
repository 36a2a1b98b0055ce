//! Header (control) packet layout.
//!
//! Packet structure (64 bytes):
//! - Bytes 0-3: `wang` signature
//! - Byte 6: Blink flag (0/1)
//! - Byte 7: Scrolling light flag (0/1)
//! - Byte 8: `16 * (speed - 1) + animation`
//! - Bytes 10-15: ASCII `000000`
//! - Bytes 16-17: Character count (byte 17 only, or high/low split)
//! - Bytes 38-43: Unknown constant block
//! - Everything else: zero

use crate::profile::{CountEncoding, ProtocolProfile};
use crate::types::{DisplayOptions, ProtocolError, ProtocolResult};

/// Length of the header packet
pub const HEADER_LEN: usize = 64;

/// Byte offsets within the header
pub mod offset {
    pub const BLINK: usize = 6;
    pub const SCROLLING_LIGHT: usize = 7;
    pub const MODE: usize = 8;
    pub const COUNT_HIGH: usize = 16;
    pub const COUNT_LOW: usize = 17;
}

/// Header template as captured from the vendor tool
#[rustfmt::skip]
pub const WANG_HEADER: [u8; HEADER_LEN] = [
    0x77, 0x61, 0x6E, 0x67, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x30, 0x30, 0x30, 0x30, 0x30, 0x30,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x14, 0x0C,
    0x09, 0x17, 0x25, 0x33, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Build the header packet for a message of `count` characters
pub fn header(
    options: &DisplayOptions,
    count: usize,
    profile: &ProtocolProfile,
) -> ProtocolResult<[u8; HEADER_LEN]> {
    let max = profile.count_encoding.max_count();
    if count > max {
        return Err(ProtocolError::CountOverflow { count, max });
    }

    let mut packet = profile.header_template;
    packet[offset::BLINK] = options.blink as u8;
    packet[offset::SCROLLING_LIGHT] = options.scrolling_light as u8;
    packet[offset::MODE] = options.mode_byte();

    match profile.count_encoding {
        CountEncoding::SingleByte => packet[offset::COUNT_LOW] = count as u8,
        CountEncoding::SplitByte if count <= u8::MAX as usize => {
            packet[offset::COUNT_LOW] = count as u8
        },
        CountEncoding::SplitByte => {
            packet[offset::COUNT_HIGH] = (count >> 8) as u8;
            packet[offset::COUNT_LOW] = (count & 0xFF) as u8;
        },
    }

    Ok(packet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LayoutMode;

    fn options(speed: u8, animation: u8, blink: bool, light: bool) -> DisplayOptions {
        DisplayOptions::new(speed, animation, blink, light, LayoutMode::Continuous).unwrap()
    }

    #[test]
    fn constant_blocks_are_preserved() {
        let packet = header(&options(1, 0, false, false), 0, &ProtocolProfile::default()).unwrap();
        assert_eq!(&packet[0..4], b"wang");
        assert_eq!(&packet[10..16], b"000000");
        assert_eq!(&packet[38..44], &[0x14, 0x0C, 0x09, 0x17, 0x25, 0x33]);
        // with everything zeroed, nothing else differs from the template
        assert_eq!(packet, WANG_HEADER);
    }

    #[test]
    fn flags_and_mode_byte() {
        let packet = header(&options(8, 11, true, true), 5, &ProtocolProfile::default()).unwrap();
        assert_eq!(packet[6], 1);
        assert_eq!(packet[7], 1);
        assert_eq!(packet[8], 123);
        assert_eq!(packet[17], 5);

        let packet = header(&options(6, 3, false, true), 5, &ProtocolProfile::default()).unwrap();
        assert_eq!(packet[6], 0);
        assert_eq!(packet[7], 1);
        assert_eq!(packet[8], 83);
    }

    #[test]
    fn split_count() {
        let packet = header(&options(1, 0, false, false), 300, &ProtocolProfile::localized())
            .unwrap();
        assert_eq!(packet[16], 1);
        assert_eq!(packet[17], 44);

        let packet = header(&options(1, 0, false, false), 255, &ProtocolProfile::localized())
            .unwrap();
        assert_eq!(packet[16], 0);
        assert_eq!(packet[17], 255);
    }

    #[test]
    fn single_byte_count_rejects_overflow() {
        let opts = options(1, 0, false, false);
        let profile = ProtocolProfile::english();
        assert_eq!(header(&opts, 255, &profile).unwrap()[17], 255);
        assert_eq!(
            header(&opts, 300, &profile),
            Err(ProtocolError::CountOverflow {
                count: 300,
                max: 255
            })
        );
        assert!(header(&opts, 70_000, &ProtocolProfile::localized()).is_err());
    }

    #[test]
    fn other_bytes_stay_zero() {
        let packet = header(&options(4, 2, true, false), 300, &ProtocolProfile::localized())
            .unwrap();
        for (i, byte) in packet.iter().enumerate() {
            let expected = match i {
                0..=3 | 10..=15 | 38..=43 => WANG_HEADER[i],
                6 => 1,
                8 => 50,
                16 => 1,
                17 => 44,
                _ => 0,
            };
            assert_eq!(*byte, expected, "byte {i}");
        }
    }
}
