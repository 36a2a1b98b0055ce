//! Core traits and types for badge-sync device abstraction.
//!
//! This crate provides:
//! - The `Badge` trait, with header-then-data upload sequencing
//! - Report framing for HID output reports
//! - Common types like `BadgeInfo` and `BadgeError`

mod board;
mod error;
mod report;

pub use board::{Badge, BadgeInfo};
pub use error::{BadgeError, Result};
pub use report::frame_report;
