//! Hour and orbit angles of the sun and moon.
//!
//! An [`AngleModel`] turns a wall-clock time into the angle at which the sun
//! or moon is drawn on the dashboard dial. [`PreciseAngles`] asks an
//! [`Ephemeris`] for the real hour angle; [`SimplifiedAngles`] derives a
//! plausible one from the time of day alone. [`AngleStrategy`] picks one of
//! the two when the dashboard is built.

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};
use serde::Serialize;
use tianwen_core::{AngleModelKind, Body, Derived, Luminary, Observer, normalize_degrees};

use crate::analytic::AnalyticEphemeris;
use crate::coords::KM_PER_AU;
use crate::ephemeris::Ephemeris;
use crate::error::{AstroError, Result};
use crate::riseset::{Crossing, search_rise_set};
use crate::time::AstroTime;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Degrees the simplified moon falls behind the sun each day.
const SIMPLIFIED_LUNAR_DAILY_LAG: f64 = 13.2;

/// Converts a time into dial angles.
pub trait AngleModel {
    /// Which strategy this is.
    fn kind(&self) -> AngleModelKind;

    /// Hour angle of `body` in `[0, 360)`, or the reason it could not be
    /// computed. A missing observer means [`Observer::DEFAULT`].
    fn try_hour_angle(
        &self,
        body: Luminary,
        time: DateTime<FixedOffset>,
        observer: Option<&Observer>,
    ) -> Result<f64>;

    /// Hour angle with the documented fallback (sun 0°, moon 180°).
    fn hour_angle(
        &self,
        body: Luminary,
        time: DateTime<FixedOffset>,
        observer: Option<&Observer>,
    ) -> Derived<f64, AstroError> {
        let what = match body {
            Luminary::Sun => "solar hour angle",
            Luminary::Moon => "lunar hour angle",
        };
        Derived::or_fallback(
            self.try_hour_angle(body, time, observer),
            body.fallback_hour_angle(),
            what,
        )
    }

    /// Hour angle rotated by `base` degrees, in `[0, 360)`.
    fn orbit_angle(
        &self,
        base: f64,
        body: Luminary,
        time: DateTime<FixedOffset>,
        observer: Option<&Observer>,
    ) -> Derived<f64, AstroError> {
        self.hour_angle(body, time, observer)
            .map(|hour_angle| normalize_degrees(hour_angle + base))
    }
}

/// Where the sun is and when it rises and sets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolarInfo {
    pub altitude: f64,
    pub azimuth: f64,
    pub right_ascension: f64,
    pub declination: f64,
    /// Distance in AU.
    pub distance: f64,
    pub hour_angle: f64,
    pub orbit_angle: f64,
    /// Next sunrise within a day, if any.
    pub sunrise: Option<DateTime<Utc>>,
    /// Next sunset within a day, if any.
    pub sunset: Option<DateTime<Utc>>,
    pub illumination: f64,
}

/// Where the moon is, when it rises and sets, and how lit it is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LunarInfo {
    pub altitude: f64,
    pub azimuth: f64,
    pub right_ascension: f64,
    pub declination: f64,
    /// Distance in AU.
    pub distance: f64,
    pub hour_angle: f64,
    pub orbit_angle: f64,
    pub moonrise: Option<DateTime<Utc>>,
    pub moonset: Option<DateTime<Utc>>,
    /// Fraction of the synodic month elapsed, `[0, 1)`.
    pub phase: f64,
    /// Illuminated fraction of the disc, `[0, 1]`.
    pub illumination: f64,
}

/// Position shared by the solar and lunar bundles.
struct BodyPosition {
    altitude: f64,
    azimuth: f64,
    right_ascension: f64,
    declination: f64,
    distance: f64,
    hour_angle: f64,
    rise: Option<DateTime<Utc>>,
    set: Option<DateTime<Utc>>,
}

/// Hour angles from an ephemeris: local sidereal time minus right ascension.
#[derive(Debug, Clone, Default)]
pub struct PreciseAngles<E = AnalyticEphemeris> {
    ephemeris: E,
}

impl<E: Ephemeris> PreciseAngles<E> {
    pub fn new(ephemeris: E) -> Self {
        Self { ephemeris }
    }

    pub fn ephemeris(&self) -> &E {
        &self.ephemeris
    }

    fn position(
        &self,
        body: Body,
        time: DateTime<FixedOffset>,
        observer: Option<&Observer>,
    ) -> Result<BodyPosition> {
        let observer = observer.unwrap_or(&Observer::DEFAULT);
        let t = AstroTime::from_datetime(&time);

        let equatorial = self.ephemeris.equatorial(body, t, observer)?;
        let horizontal = self.ephemeris.horizontal(t, observer, &equatorial)?;
        let lst = self.ephemeris.local_sidereal_time(t, observer)?;
        let geocentric = self.ephemeris.geocentric_ecliptic(body, t)?;

        let search = |crossing| -> Result<Option<DateTime<Utc>>> {
            Ok(search_rise_set(&self.ephemeris, body, observer, crossing, t, 1.0)?
                .and_then(AstroTime::to_utc))
        };

        Ok(BodyPosition {
            altitude: horizontal.altitude,
            azimuth: horizontal.azimuth,
            right_ascension: equatorial.right_ascension,
            declination: equatorial.declination,
            distance: geocentric.distance,
            hour_angle: normalize_degrees(lst - equatorial.right_ascension),
            rise: search(Crossing::Rise)?,
            set: search(Crossing::Set)?,
        })
    }

    /// Position, rise and set of the sun.
    pub fn solar_info(
        &self,
        time: DateTime<FixedOffset>,
        observer: Option<&Observer>,
    ) -> Result<SolarInfo> {
        let p = self.position(Body::Sun, time, observer)?;
        Ok(SolarInfo {
            altitude: p.altitude,
            azimuth: p.azimuth,
            right_ascension: p.right_ascension,
            declination: p.declination,
            distance: p.distance,
            hour_angle: p.hour_angle,
            orbit_angle: p.hour_angle,
            sunrise: p.rise,
            sunset: p.set,
            illumination: 1.0,
        })
    }

    /// Position, rise, set and phase of the moon.
    pub fn lunar_info(
        &self,
        time: DateTime<FixedOffset>,
        observer: Option<&Observer>,
    ) -> Result<LunarInfo> {
        let p = self.position(Body::Moon, time, observer)?;
        let phase_angle = self
            .ephemeris
            .moon_phase_angle(AstroTime::from_datetime(&time))?;
        Ok(LunarInfo {
            altitude: p.altitude,
            azimuth: p.azimuth,
            right_ascension: p.right_ascension,
            declination: p.declination,
            distance: p.distance,
            hour_angle: p.hour_angle,
            orbit_angle: p.hour_angle,
            moonrise: p.rise,
            moonset: p.set,
            phase: phase_angle / 360.0,
            illumination: (1.0 - phase_angle.to_radians().cos()) / 2.0,
        })
    }

    /// Moon distance in km, for display.
    pub fn lunar_distance_km(&self, time: DateTime<FixedOffset>) -> Result<f64> {
        let moon = self
            .ephemeris
            .geocentric_ecliptic(Body::Moon, AstroTime::from_datetime(&time))?;
        Ok(moon.distance * KM_PER_AU)
    }
}

impl<E: Ephemeris> AngleModel for PreciseAngles<E> {
    fn kind(&self) -> AngleModelKind {
        AngleModelKind::Precise
    }

    fn try_hour_angle(
        &self,
        body: Luminary,
        time: DateTime<FixedOffset>,
        observer: Option<&Observer>,
    ) -> Result<f64> {
        let observer = observer.unwrap_or(&Observer::DEFAULT);
        let t = AstroTime::from_datetime(&time);
        let equatorial = self.ephemeris.equatorial(body.into(), t, observer)?;
        let lst = self.ephemeris.local_sidereal_time(t, observer)?;
        Ok(normalize_degrees(lst - equatorial.right_ascension))
    }
}

/// Hour angles from the local time of day, without any ephemeris.
///
/// The sun turns once per day with local midnight at 0°. The moon starts
/// opposite the sun on the first of the month and lags 13.2° per day.
/// Observers are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimplifiedAngles;

impl AngleModel for SimplifiedAngles {
    fn kind(&self) -> AngleModelKind {
        AngleModelKind::Simplified
    }

    fn try_hour_angle(
        &self,
        body: Luminary,
        time: DateTime<FixedOffset>,
        _observer: Option<&Observer>,
    ) -> Result<f64> {
        let seconds =
            f64::from(time.num_seconds_from_midnight()) + f64::from(time.nanosecond()) / 1e9;
        let day_fraction = seconds / SECONDS_PER_DAY;
        let angle = match body {
            Luminary::Sun => day_fraction * 360.0,
            Luminary::Moon => {
                let days_into_month = f64::from(time.day() - 1);
                180.0
                    + (days_into_month * SIMPLIFIED_LUNAR_DAILY_LAG) % 360.0
                    + day_fraction * SIMPLIFIED_LUNAR_DAILY_LAG
            }
        };
        Ok(normalize_degrees(angle))
    }
}

/// The angle model chosen at construction time.
#[derive(Debug, Clone)]
pub enum AngleStrategy<E = AnalyticEphemeris> {
    Precise(PreciseAngles<E>),
    Simplified(SimplifiedAngles),
}

impl AngleStrategy {
    /// The strategy for a configured model, using the in-tree ephemeris.
    pub fn from_kind(kind: AngleModelKind) -> Self {
        match kind {
            AngleModelKind::Precise => AngleStrategy::Precise(PreciseAngles::default()),
            AngleModelKind::Simplified => AngleStrategy::Simplified(SimplifiedAngles),
        }
    }
}

impl Default for AngleStrategy {
    fn default() -> Self {
        Self::from_kind(AngleModelKind::default())
    }
}

impl<E: Ephemeris> AngleModel for AngleStrategy<E> {
    fn kind(&self) -> AngleModelKind {
        match self {
            AngleStrategy::Precise(model) => model.kind(),
            AngleStrategy::Simplified(model) => model.kind(),
        }
    }

    fn try_hour_angle(
        &self,
        body: Luminary,
        time: DateTime<FixedOffset>,
        observer: Option<&Observer>,
    ) -> Result<f64> {
        match self {
            AngleStrategy::Precise(model) => model.try_hour_angle(body, time, observer),
            AngleStrategy::Simplified(model) => model.try_hour_angle(body, time, observer),
        }
    }
}
