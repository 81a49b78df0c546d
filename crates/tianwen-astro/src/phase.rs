//! Named lunar phases.

use serde::Serialize;

/// One of the eight traditional phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoonPhaseName {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl MoonPhaseName {
    /// Classify a phase fraction (0 new, 0.5 full).
    ///
    /// Quarters and syzygies get a narrow band around their exact value.
    pub fn from_phase(phase: f64) -> Self {
        match phase {
            p if p < 0.03 || p > 0.97 => Self::New,
            p if p < 0.22 => Self::WaxingCrescent,
            p if p < 0.28 => Self::FirstQuarter,
            p if p < 0.47 => Self::WaxingGibbous,
            p if p < 0.53 => Self::Full,
            p if p < 0.72 => Self::WaningGibbous,
            p if p < 0.78 => Self::LastQuarter,
            _ => Self::WaningCrescent,
        }
    }

    pub fn chinese_name(self) -> &'static str {
        match self {
            Self::New => "新月",
            Self::WaxingCrescent => "娥眉月",
            Self::FirstQuarter => "上弦月",
            Self::WaxingGibbous => "盈凸月",
            Self::Full => "满月",
            Self::WaningGibbous => "亏凸月",
            Self::LastQuarter => "下弦月",
            Self::WaningCrescent => "残月",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::New => "🌑",
            Self::WaxingCrescent => "🌒",
            Self::FirstQuarter => "🌓",
            Self::WaxingGibbous => "🌔",
            Self::Full => "🌕",
            Self::WaningGibbous => "🌖",
            Self::LastQuarter => "🌗",
            Self::WaningCrescent => "🌘",
        }
    }
}

/// Chinese name of the phase.
pub fn moon_phase_name(phase: f64) -> &'static str {
    MoonPhaseName::from_phase(phase).chinese_name()
}

/// Emoji for the phase.
pub fn moon_phase_emoji(phase: f64) -> &'static str {
    MoonPhaseName::from_phase(phase).emoji()
}
