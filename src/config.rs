//! Configuration file handling

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::info;
use wang_protocol::{DisplayOptions, LayoutMode, ProtocolProfile, ProtocolResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub protocol: ProtocolConfig,
    pub render: RenderConfig,
    pub transport: TransportConfig,
}

impl Config {
    /// Get the config file path for this platform
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "badge-sync").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load config from file, or create default if it doesn't exist
    pub fn load_or_create() -> Result<Self, Box<dyn Error>> {
        let path = Self::path().ok_or("could not determine config directory")?;

        if path.exists() {
            Self::load(&path)
        } else {
            let config = Config::default();
            config.save_with_header(&path)?;
            info!("created default config at {}", path.display());
            Ok(config)
        }
    }

    /// Load config from a specific file
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save config with header comments for new files
    pub fn save_with_header(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let header = r#"# badge-sync configuration file
# speed: 1-8, animation: 0-11, layout: continuous | per-character
# profile: english | localized

"#;
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, format!("{header}{contents}"))?;
        Ok(())
    }

    /// Validated display options from the file
    pub fn display_options(&self) -> ProtocolResult<DisplayOptions> {
        let display = &self.display;
        DisplayOptions::new(
            display.speed,
            display.animation,
            display.blink,
            display.scrolling_light,
            display.layout.parse()?,
        )
    }

    /// Protocol profile with the configured threshold override applied
    pub fn profile(&self) -> ProtocolResult<ProtocolProfile> {
        let profile: ProtocolProfile = self.protocol.profile.parse()?;
        match self.protocol.threshold {
            Some(threshold) => profile.with_threshold(threshold),
            None => Ok(profile),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Scroll speed (1-8)
    pub speed: u8,
    /// Animation type (0-11)
    pub animation: u8,
    /// Blink the message
    pub blink: bool,
    /// Light the scrolling border
    pub scrolling_light: bool,
    /// "continuous" or "per-character"
    pub layout: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            speed: 6,
            animation: 0,
            blink: false,
            scrolling_light: false,
            layout: LayoutMode::default().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    /// Firmware variant
    pub profile: String,
    /// Brightness threshold override, defaults to the profile's
    pub threshold: Option<f32>,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            profile: ProtocolProfile::default().name.into(),
            threshold: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// TrueType font to rasterize with instead of the built-in bitmap font
    pub font: Option<PathBuf>,
    /// Pixel size for continuous layout
    pub continuous_size: f32,
    /// Pixel size for per-character layout
    pub per_character_size: f32,
    /// Scale factor for png previews
    pub preview_scale: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font: None,
            continuous_size: 10.5,
            per_character_size: 11.0,
            preview_scale: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Delay between reports
    #[serde(with = "humantime_serde")]
    pub pacing: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            pacing: Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use wang_protocol::ProtocolError;

    use super::*;

    #[test]
    fn default_config_round_trips() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.display_options().unwrap(), DisplayOptions::default());
        assert_eq!(parsed.profile().unwrap(), ProtocolProfile::localized());
        assert_eq!(parsed.transport.pacing, Duration::ZERO);
    }

    #[test]
    fn partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [display]
            speed = 3
            layout = "per-character"

            [transport]
            pacing = "5ms"
            "#,
        )
        .unwrap();
        let options = config.display_options().unwrap();
        assert_eq!(options.speed.get(), 3);
        assert_eq!(options.layout, LayoutMode::PerCharacter);
        assert_eq!(config.transport.pacing, Duration::from_millis(5));
        assert_eq!(config.render.preview_scale, 8);
    }

    #[test]
    fn out_of_range_values_are_errors() {
        let config: Config = toml::from_str("[display]\nspeed = 12\n").unwrap();
        assert_eq!(
            config.display_options(),
            Err(ProtocolError::SpeedOutOfRange(12))
        );

        let config: Config = toml::from_str("[protocol]\nprofile = \"martian\"\n").unwrap();
        assert!(config.profile().is_err());
    }

    #[test]
    fn threshold_override() {
        let config: Config =
            toml::from_str("[protocol]\nprofile = \"english\"\nthreshold = 0.3\n").unwrap();
        let profile = config.profile().unwrap();
        assert_eq!(profile.name, "english");
        assert_eq!(profile.threshold, 0.3);
    }
}
