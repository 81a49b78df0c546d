//! User-selectable settings shared by the config file and the dashboard.

use serde::{Deserialize, Serialize};

/// Which hour-angle implementation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleModelKind {
    /// Sidereal time and right ascension from the ephemeris.
    #[default]
    Precise,
    /// Pure clock arithmetic.
    Simplified,
}

impl AngleModelKind {
    /// Switch to the other model.
    pub fn toggle(self) -> Self {
        match self {
            AngleModelKind::Precise => AngleModelKind::Simplified,
            AngleModelKind::Simplified => AngleModelKind::Precise,
        }
    }
}

/// Which calendar implementation to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarModelKind {
    /// Solar terms and lunar months from the sun and moon positions.
    #[default]
    Astronomical,
    /// Closed-form cycle arithmetic.
    Approximate,
}

impl CalendarModelKind {
    /// Switch to the other model.
    pub fn toggle(self) -> Self {
        match self {
            CalendarModelKind::Astronomical => CalendarModelKind::Approximate,
            CalendarModelKind::Approximate => CalendarModelKind::Astronomical,
        }
    }
}

/// How twinkle and pulse animations evolve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OscillatorMode {
    /// The value feeds its own next value: `v = (sin(v * speed) + 1) / 2`.
    #[default]
    Recurrence,
    /// A phase accumulates with elapsed time and drives the wave.
    TimeDriven,
}

/// Global animation speed preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    /// Multiplier applied to every registered animation speed.
    pub fn multiplier(self) -> f64 {
        match self {
            AnimationSpeed::Slow => 0.5,
            AnimationSpeed::Medium => 1.0,
            AnimationSpeed::Fast => 2.0,
        }
    }

    /// One step faster, saturating.
    pub fn faster(self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Medium,
            AnimationSpeed::Medium | AnimationSpeed::Fast => AnimationSpeed::Fast,
        }
    }

    /// One step slower, saturating.
    pub fn slower(self) -> Self {
        match self {
            AnimationSpeed::Fast => AnimationSpeed::Medium,
            AnimationSpeed::Medium | AnimationSpeed::Slow => AnimationSpeed::Slow,
        }
    }
}

/// Color theme for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Gold,
    Cyan,
    Green,
    Magenta,
    White,
}

impl ColorTheme {
    /// Cycle to the next color theme.
    pub fn next(self) -> Self {
        match self {
            ColorTheme::Gold => ColorTheme::Cyan,
            ColorTheme::Cyan => ColorTheme::Green,
            ColorTheme::Green => ColorTheme::Magenta,
            ColorTheme::Magenta => ColorTheme::White,
            ColorTheme::White => ColorTheme::Gold,
        }
    }
}
