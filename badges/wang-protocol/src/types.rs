//! Display options and error types for the wang badge protocol.

use std::fmt::Display;
use std::str::FromStr;

pub type ProtocolResult<T> = Result<T, ProtocolError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ProtocolError {
    #[error("speed {0} is out of range (1-8)")]
    SpeedOutOfRange(u8),
    #[error("animation {0} is out of range (0-11)")]
    AnimationOutOfRange(u8),
    #[error("invalid {option}: {value:?}")]
    InvalidOption { option: &'static str, value: String },
    #[error("character count {count} does not fit in the header (max {max})")]
    CountOverflow { count: usize, max: usize },
    #[error("invalid protocol profile: {0}")]
    InvalidProfile(&'static str),
    #[error("rasterization failed: {0}")]
    Rasterization(#[from] crate::raster::RasterError),
}

/// Scroll speed, 1 (slowest) through 8
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Speed(u8);

impl Speed {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 8;

    pub fn new(speed: u8) -> ProtocolResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&speed) {
            Ok(Self(speed))
        } else {
            Err(ProtocolError::SpeedOutOfRange(speed))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(6)
    }
}

impl FromStr for Speed {
    type Err = ProtocolError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<u8>().map_err(|_| ProtocolError::InvalidOption {
            option: "speed",
            value: s.to_string(),
        })?;
        Self::new(value)
    }
}

impl Display for Speed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Animation type understood by the badge firmware (0-11).
///
/// Only the numeric range is known; what each value looks like is up to the device.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Animation(u8);

impl Animation {
    pub const MAX: u8 = 11;

    pub fn new(animation: u8) -> ProtocolResult<Self> {
        if animation <= Self::MAX {
            Ok(Self(animation))
        } else {
            Err(ProtocolError::AnimationOutOfRange(animation))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl FromStr for Animation {
    type Err = ProtocolError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<u8>().map_err(|_| ProtocolError::InvalidOption {
            option: "animation",
            value: s.to_string(),
        })?;
        Self::new(value)
    }
}

impl Display for Animation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How text is laid out on the bitmap before packing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutMode {
    /// Whole string rendered onto one shared canvas
    #[default]
    Continuous,
    /// Each character rendered into its own cell
    PerCharacter,
}

impl FromStr for LayoutMode {
    type Err = ProtocolError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "continuous" | "c" => Ok(Self::Continuous),
            "per-character" | "separate" | "s" => Ok(Self::PerCharacter),
            _ => Err(ProtocolError::InvalidOption {
                option: "layout",
                value: s.to_string(),
            }),
        }
    }
}

impl Display for LayoutMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Continuous => write!(f, "continuous"),
            Self::PerCharacter => write!(f, "per-character"),
        }
    }
}

/// Options for a single encoding run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    pub speed: Speed,
    pub animation: Animation,
    pub blink: bool,
    pub scrolling_light: bool,
    pub layout: LayoutMode,
}

impl DisplayOptions {
    /// Build options from raw numeric values, validating the documented ranges
    pub fn new(
        speed: u8,
        animation: u8,
        blink: bool,
        scrolling_light: bool,
        layout: LayoutMode,
    ) -> ProtocolResult<Self> {
        Ok(Self {
            speed: Speed::new(speed)?,
            animation: Animation::new(animation)?,
            blink,
            scrolling_light,
            layout,
        })
    }

    /// Combined speed and animation byte, `16 * (speed - 1) + animation`
    pub fn mode_byte(&self) -> u8 {
        16 * (self.speed.get() - 1) + self.animation.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_bounds() {
        assert!(Speed::new(1).is_ok());
        assert!(Speed::new(8).is_ok());
        assert_eq!(Speed::new(0), Err(ProtocolError::SpeedOutOfRange(0)));
        assert_eq!(Speed::new(9), Err(ProtocolError::SpeedOutOfRange(9)));
    }

    #[test]
    fn animation_bounds() {
        assert!(Animation::new(0).is_ok());
        assert!(Animation::new(11).is_ok());
        assert_eq!(
            Animation::new(12),
            Err(ProtocolError::AnimationOutOfRange(12))
        );
    }

    #[test]
    fn unparsable_options_are_config_errors() {
        assert!(matches!(
            "fast".parse::<Speed>(),
            Err(ProtocolError::InvalidOption { option: "speed", .. })
        ));
        assert!(matches!(
            "-1".parse::<Animation>(),
            Err(ProtocolError::InvalidOption { option: "animation", .. })
        ));
        assert_eq!(" 3".parse::<Speed>().map(Speed::get), Ok(3));
    }

    #[test]
    fn layout_names() {
        assert_eq!("separate".parse(), Ok(LayoutMode::PerCharacter));
        assert_eq!("Continuous".parse(), Ok(LayoutMode::Continuous));
        assert!("diagonal".parse::<LayoutMode>().is_err());
    }

    #[test]
    fn mode_byte_extremes() {
        let slow = DisplayOptions::new(1, 0, false, false, LayoutMode::Continuous).unwrap();
        assert_eq!(slow.mode_byte(), 0);
        let fast = DisplayOptions::new(8, 11, false, false, LayoutMode::Continuous).unwrap();
        assert_eq!(fast.mode_byte(), 123);
    }
}
