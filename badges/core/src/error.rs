//! Errors shared by badge implementations.

/// Errors that can occur during badge operations
#[derive(Debug, thiserror::Error)]
pub enum BadgeError {
    /// Device was not found
    #[error("device not found")]
    DeviceNotFound,

    /// The device accepted fewer bytes than a full report
    #[error("short write: {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },

    /// Report length too small to carry any payload
    #[error("invalid report length: {0}")]
    InvalidReportLength(usize),

    /// HID communication error
    #[error("hid error: {0}")]
    Hid(#[from] hidapi::HidError),

    /// Generic IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BadgeError>;
