//! Badge detection and selection logic.

use std::str::FromStr;

use badge_core::{Badge, BadgeError};
use bpaf::Bpaf;
use hidapi::HidApi;
use led_badge::LedBadge;

/// Supported badge types
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Bpaf)]
#[bpaf(fallback(BadgeKind::Auto), group_help("Badge selection:"))]
pub enum BadgeKind {
    /// Auto-detect connected badge (default)
    #[default]
    Auto,
    /// 11x44 LED name badge (0416:5020)
    Wang,
}

impl FromStr for BadgeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "wang" => Ok(Self::Wang),
            _ => Err(format!("unknown badge: {s}. Available: auto, wang")),
        }
    }
}

impl std::fmt::Display for BadgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Wang => write!(f, "wang"),
        }
    }
}

impl BadgeKind {
    /// Open the specified badge, or auto-detect if Auto
    pub fn as_badge(&self) -> Result<Box<dyn Badge>, BadgeError> {
        match self {
            BadgeKind::Auto => {
                // Single HID iteration, check each badge's INFO
                let api = HidApi::new()?;
                for device in api.device_list() {
                    if led_badge::matches(device) {
                        return Ok(Box::new(LedBadge::open_with(&api)?));
                    }
                    // Add more badges here as they're implemented
                }
                Err(BadgeError::DeviceNotFound)
            },
            BadgeKind::Wang => Ok(Box::new(LedBadge::open()?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_names_round_trip() {
        for kind in [BadgeKind::Auto, BadgeKind::Wang] {
            assert_eq!(kind.to_string().parse::<BadgeKind>(), Ok(kind));
        }
        assert!("zoom65".parse::<BadgeKind>().is_err());
    }

    #[test]
    fn cli_name_matches_badge_info() {
        assert_eq!(led_badge::INFO.cli_name.parse::<BadgeKind>(), Ok(BadgeKind::Wang));
    }
}
