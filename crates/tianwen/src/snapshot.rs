//! One-shot JSON snapshot for `--once`.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use tianwen_astro::{
    AngleModel, Ephemeris, MoonPhase, MoonPhaseName, PlanetData, all_planet_positions,
    moon_phase, moon_phase_chinese_name,
};
use tianwen_calendar::{CalendarModel, ChineseCalendarInfo, solar_term_description};
use tianwen_core::{AngleModelKind, CalendarModelKind, Luminary, Observer};

/// Hour and orbit angle of the sun or moon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialReading {
    pub hour_angle: f64,
    pub orbit_angle: f64,
    /// Whether the angle is the fixed fallback.
    pub fallback: bool,
}

impl DialReading {
    fn read<A: AngleModel>(
        angles: &A,
        body: Luminary,
        time: DateTime<FixedOffset>,
        observer: &Observer,
    ) -> Self {
        let hour_angle = angles.hour_angle(body, time, Some(observer));
        Self {
            orbit_angle: angles.orbit_angle(0.0, body, time, Some(observer)).get(),
            fallback: hour_angle.is_fallback(),
            hour_angle: hour_angle.get(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoonReading {
    #[serde(flatten)]
    pub dial: DialReading,
    #[serde(flatten)]
    pub phase: MoonPhase,
    pub phase_name: &'static str,
    pub phase_emoji: &'static str,
    pub traditional_name: &'static str,
}

/// Everything the dashboard would show at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub time: DateTime<FixedOffset>,
    pub observer: Observer,
    pub angle_model: AngleModelKind,
    pub calendar_model: CalendarModelKind,
    pub sun: DialReading,
    pub moon: MoonReading,
    pub planets: Vec<PlanetData>,
    pub calendar: ChineseCalendarInfo,
    pub solar_term_description: Option<String>,
}

impl Snapshot {
    pub fn capture<A, K, E>(
        angles: &A,
        calendar: &K,
        ephemeris: &E,
        time: DateTime<FixedOffset>,
        observer: &Observer,
    ) -> Self
    where
        A: AngleModel,
        K: CalendarModel,
        E: Ephemeris,
    {
        let phase = moon_phase(ephemeris, time).get();
        let name = MoonPhaseName::from_phase(phase.phase);
        let info = calendar.calendar_info(time).into_value();
        Self {
            time,
            observer: *observer,
            angle_model: angles.kind(),
            calendar_model: calendar.kind(),
            sun: DialReading::read(angles, Luminary::Sun, time, observer),
            moon: MoonReading {
                dial: DialReading::read(angles, Luminary::Moon, time, observer),
                phase,
                phase_name: name.chinese_name(),
                phase_emoji: name.emoji(),
                traditional_name: moon_phase_chinese_name(phase.phase),
            },
            planets: all_planet_positions(ephemeris, time),
            solar_term_description: info.solar_term.as_ref().map(solar_term_description),
            calendar: info,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
