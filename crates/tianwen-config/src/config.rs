//! The configuration file model.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tianwen_core::{
    AngleModelKind, AnimationSpeed, CalendarModelKind, ColorTheme, Observer, ObserverPreset,
    OscillatorMode,
};

use crate::error::{ConfigError, Result};
use crate::paths::config_path;

/// Longest refresh interval accepted, one day.
const MAX_REFRESH_MS: u64 = 86_400_000;

/// Where the dashboard observes from.
///
/// In TOML either a preset name, `observer = "shanghai"`, or a table with
/// `latitude`, `longitude` and an optional `elevation`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObserverConfig {
    Preset(ObserverPreset),
    Custom(Observer),
}

impl ObserverConfig {
    pub fn observer(self) -> Observer {
        match self {
            ObserverConfig::Preset(preset) => preset.observer(),
            ObserverConfig::Custom(observer) => observer,
        }
    }

    /// Preset display name, or the coordinates.
    pub fn label(self) -> String {
        match self {
            ObserverConfig::Preset(preset) => preset.name().to_string(),
            ObserverConfig::Custom(o) => format!("{:.2}°, {:.2}°", o.latitude, o.longitude),
        }
    }
}

impl Default for ObserverConfig {
    fn default() -> Self {
        ObserverConfig::Preset(ObserverPreset::default())
    }
}

/// Every user setting. Fields missing from the file take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub angle_model: AngleModelKind,
    pub calendar_model: CalendarModelKind,
    pub oscillator_mode: OscillatorMode,
    pub animation_speed: AnimationSpeed,
    pub color_theme: ColorTheme,

    /// How often the sun and moon dial angles are recomputed.
    pub angle_refresh_ms: u64,

    /// How often planet positions are recomputed.
    pub planet_refresh_ms: u64,

    // kept last so the table form serializes after the plain values
    pub observer: ObserverConfig,
}

fn default_angle_refresh_ms() -> u64 {
    1_000
}

fn default_planet_refresh_ms() -> u64 {
    60_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            angle_model: AngleModelKind::default(),
            calendar_model: CalendarModelKind::default(),
            oscillator_mode: OscillatorMode::default(),
            animation_speed: AnimationSpeed::default(),
            color_theme: ColorTheme::default(),
            angle_refresh_ms: default_angle_refresh_ms(),
            planet_refresh_ms: default_planet_refresh_ms(),
            observer: ObserverConfig::default(),
        }
    }
}

impl Config {
    /// Load from the platform configuration path.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Save to the platform configuration path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path()?)
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(write_err)?;
        tracing::debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Reject values the dashboard cannot use.
    pub fn validate(&self) -> Result<()> {
        if !self.observer().is_valid() {
            return Err(ConfigError::Invalid {
                field: "observer",
                reason: "latitude must be within -90..=90 and all coordinates finite".into(),
            });
        }
        check_refresh("angle_refresh_ms", self.angle_refresh_ms)?;
        check_refresh("planet_refresh_ms", self.planet_refresh_ms)?;
        Ok(())
    }

    pub fn observer(&self) -> Observer {
        self.observer.observer()
    }

    pub fn angle_refresh(&self) -> Duration {
        Duration::from_millis(self.angle_refresh_ms)
    }

    pub fn planet_refresh(&self) -> Duration {
        Duration::from_millis(self.planet_refresh_ms)
    }
}

fn check_refresh(field: &'static str, ms: u64) -> Result<()> {
    if ms == 0 || ms > MAX_REFRESH_MS {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("{ms} ms is outside 1..={MAX_REFRESH_MS}"),
        });
    }
    Ok(())
}
