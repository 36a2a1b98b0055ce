//! Protocol variants observed across badge firmwares.
//!
//! Both variants share one encoder; they only differ in the values carried here.

use std::fmt::Display;
use std::str::FromStr;

use crate::abi::{HEADER_LEN, WANG_HEADER};
use crate::types::{ProtocolError, ProtocolResult};

/// Size of one glyph cell in pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellGeometry {
    pub width: usize,
    pub height: usize,
}

impl CellGeometry {
    /// Bytes emitted for one pixel row of a cell
    pub fn bytes_per_row(&self) -> usize {
        self.width.div_ceil(8)
    }

    /// Bytes emitted for a whole cell
    pub fn bytes_per_cell(&self) -> usize {
        self.bytes_per_row() * self.height
    }
}

impl Default for CellGeometry {
    fn default() -> Self {
        Self {
            width: 8,
            height: 11,
        }
    }
}

/// How the character count is written into the header
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountEncoding {
    /// Byte 17 only, counts above 255 are rejected
    SingleByte,
    /// Byte 17 alone up to 255, otherwise high byte at 16 and low byte at 17
    SplitByte,
}

impl CountEncoding {
    pub fn max_count(self) -> usize {
        match self {
            Self::SingleByte => u8::MAX as usize,
            Self::SplitByte => u16::MAX as usize,
        }
    }
}

/// How continuous-mode canvas width is derived from the text
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidthAccounting {
    /// Every character takes one cell width
    Uniform,
    /// Code points below 128 take `half` pixels, everything else `full`
    CodePoint { half: usize, full: usize },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProtocolProfile {
    pub name: &'static str,
    pub header_template: [u8; HEADER_LEN],
    pub count_encoding: CountEncoding,
    pub width_accounting: WidthAccounting,
    /// Samples strictly above this brightness light a pixel
    pub threshold: f32,
    pub geometry: CellGeometry,
    /// Maximum data packet length
    pub max_payload: usize,
}

impl ProtocolProfile {
    pub const NAMES: &'static str = "[ english, localized ]";

    /// Ascii-only firmware: one byte character count, every character one cell wide
    pub fn english() -> Self {
        Self {
            name: "english",
            header_template: WANG_HEADER,
            count_encoding: CountEncoding::SingleByte,
            width_accounting: WidthAccounting::Uniform,
            threshold: 0.7,
            geometry: CellGeometry::default(),
            max_payload: 64,
        }
    }

    /// Firmware with full-width glyph support and a two byte character count
    pub fn localized() -> Self {
        Self {
            name: "localized",
            header_template: WANG_HEADER,
            count_encoding: CountEncoding::SplitByte,
            width_accounting: WidthAccounting::CodePoint { half: 8, full: 10 },
            threshold: 0.5,
            geometry: CellGeometry::default(),
            max_payload: 64,
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> ProtocolResult<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ProtocolError::InvalidOption {
                option: "threshold",
                value: threshold.to_string(),
            });
        }
        self.threshold = threshold;
        Ok(self)
    }

    pub fn with_geometry(mut self, geometry: CellGeometry) -> ProtocolResult<Self> {
        if geometry.width == 0 || geometry.height == 0 {
            return Err(ProtocolError::InvalidProfile("cell dimensions must be non-zero"));
        }
        self.geometry = geometry;
        Ok(self)
    }

    pub fn with_max_payload(mut self, max_payload: usize) -> ProtocolResult<Self> {
        if max_payload == 0 {
            return Err(ProtocolError::InvalidProfile("max payload must be non-zero"));
        }
        self.max_payload = max_payload;
        Ok(self)
    }
}

impl Default for ProtocolProfile {
    fn default() -> Self {
        Self::localized()
    }
}

impl FromStr for ProtocolProfile {
    type Err = ProtocolError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "english" | "en" => Ok(Self::english()),
            "localized" | "l10n" => Ok(Self::localized()),
            _ => Err(ProtocolError::InvalidOption {
                option: "profile",
                value: s.to_string(),
            }),
        }
    }
}

impl Display for ProtocolProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_names_round_trip() {
        for name in ["english", "localized"] {
            let profile: ProtocolProfile = name.parse().unwrap();
            assert_eq!(profile.to_string(), name);
        }
        assert!("klingon".parse::<ProtocolProfile>().is_err());
    }

    #[test]
    fn builders_reject_degenerate_values() {
        let profile = ProtocolProfile::default();
        assert!(profile.clone().with_max_payload(0).is_err());
        assert!(profile.clone().with_threshold(1.5).is_err());
        assert!(profile
            .clone()
            .with_geometry(CellGeometry {
                width: 0,
                height: 11
            })
            .is_err());
        assert_eq!(profile.with_threshold(0.25).unwrap().threshold, 0.25);
    }

    #[test]
    fn geometry_byte_counts() {
        let geometry = CellGeometry::default();
        assert_eq!(geometry.bytes_per_row(), 1);
        assert_eq!(geometry.bytes_per_cell(), 11);
        let wide = CellGeometry {
            width: 12,
            height: 4,
        };
        assert_eq!(wide.bytes_per_row(), 2);
        assert_eq!(wide.bytes_per_cell(), 8);
    }
}
