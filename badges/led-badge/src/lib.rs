//! High level hidapi abstraction for 11x44 LED name badges.
//!
//! These badges enumerate as a generic HID device and accept 64 byte packets
//! wrapped in 65 byte output reports: a `wang` header packet first, then the
//! message bitmap produced by `wang_protocol::Encoder`.

use badge_core::{Badge, BadgeError, BadgeInfo, Result};
use hidapi::{DeviceInfo, HidApi, HidDevice};
use tracing::debug;

pub mod consts {
    pub const VENDOR_ID: u16 = 0x0416;
    pub const PRODUCT_ID: u16 = 0x5020;
    /// 64 byte packet plus the report id
    pub const REPORT_LENGTH: usize = 65;
}

/// Static badge info for detection
pub static INFO: BadgeInfo = BadgeInfo {
    name: "LED Badge 11x44",
    cli_name: "wang",
    vendor_id: consts::VENDOR_ID,
    product_id: consts::PRODUCT_ID,
    report_length: consts::REPORT_LENGTH,
};

/// Check if a HID device is one of these badges
pub fn matches(device: &DeviceInfo) -> bool {
    device.vendor_id() == INFO.vendor_id && device.product_id() == INFO.product_id
}

/// High level abstraction for managing an LED badge
pub struct LedBadge {
    pub device: HidDevice,
}

impl LedBadge {
    /// Find and open the first connected badge
    pub fn open() -> Result<Self> {
        let api = HidApi::new()?;
        Self::open_with(&api)
    }

    /// Find and open the first connected badge using an existing hidapi handle
    pub fn open_with(api: &HidApi) -> Result<Self> {
        let info = api
            .device_list()
            .find(|d| matches(d))
            .ok_or(BadgeError::DeviceNotFound)?;
        debug!(path = ?info.path(), "opening badge");
        Ok(Self {
            device: info.open_device(api)?,
        })
    }
}

// === Trait Implementations ===

impl Badge for LedBadge {
    fn info(&self) -> &'static BadgeInfo {
        &INFO
    }

    fn write_report(&mut self, report: &[u8]) -> Result<()> {
        let written = self.device.write(report)?;
        if written < report.len() {
            return Err(BadgeError::ShortWrite {
                written,
                expected: report.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_fits_a_full_packet() {
        assert_eq!(
            INFO.report_length - 1,
            wang_protocol::ProtocolProfile::default().max_payload
        );
        assert_eq!(INFO.report_length - 1, wang_protocol::HEADER_LEN);
    }
}
