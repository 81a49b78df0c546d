//! The moon's orbit as drawn on the dashboard.
//!
//! Every query falls back to a fixed value when the ephemeris fails, so the
//! moon always has somewhere to be drawn.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use tianwen_core::{Body, Derived, Observer, normalize_degrees};

use crate::coords::{Ecliptic, KM_PER_AU};
use crate::ephemeris::Ephemeris;
use crate::error::{AstroError, Result};
use crate::time::AstroTime;

/// Mean synodic month, days.
pub const SYNODIC_MONTH: f64 = 29.530_59;

/// Mean inclination of the lunar orbit to the ecliptic, degrees.
pub const LUNAR_INCLINATION: f64 = 5.145;

/// Mean Earth-Moon distance, km.
pub const MEAN_DISTANCE_KM: f64 = 384_400.0;

/// Display offset of the white-path centre, in pixels.
const WHITE_PATH_OFFSET: f64 = 30.0;

const FALLBACK_ECLIPTIC: Ecliptic = Ecliptic {
    longitude: 0.0,
    latitude: 0.0,
    distance: 0.002_57,
};

/// Progress through the synodic month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoonPhase {
    /// `[0, 1)`: 0 new, 0.5 full.
    pub phase: f64,
    /// Days since new moon.
    pub age: f64,
    /// Illuminated fraction, `[0, 1]`.
    pub illumination: f64,
}

impl MoonPhase {
    const UNKNOWN: MoonPhase = MoonPhase {
        phase: 0.0,
        age: 0.0,
        illumination: 0.0,
    };

    /// Phase record for an elongation of `angle` degrees.
    pub fn from_angle(angle: f64) -> Self {
        let phase = normalize_degrees(angle) / 360.0;
        Self {
            phase,
            age: phase * SYNODIC_MONTH,
            illumination: (1.0 - angle.to_radians().cos()) / 2.0,
        }
    }
}

/// Everything the dashboard shows about the moon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoonData {
    pub name: &'static str,
    pub chinese_name: &'static str,
    pub color: &'static str,
    /// Apparent magnitude at full moon.
    pub magnitude: f64,
    pub ecliptic_longitude: f64,
    pub ecliptic_latitude: f64,
    /// Distance from the Earth, km.
    pub distance_from_earth: f64,
    pub phase: f64,
    pub age: f64,
}

/// How the lunar orbit ring is tilted and shifted against the ecliptic ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WhitePath {
    pub inclination: f64,
    pub ascending_node: f64,
    /// Pixels between the two ring centres.
    pub offset_distance: f64,
    pub offset_angle: f64,
}

impl WhitePath {
    const FALLBACK: WhitePath = WhitePath {
        inclination: LUNAR_INCLINATION,
        ascending_node: 0.0,
        offset_distance: WHITE_PATH_OFFSET,
        offset_angle: 0.0,
    };
}

/// Coordinates measured along the lunar orbit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WhitePathCoords {
    pub longitude: f64,
    pub latitude: f64,
}

/// The moon as seen by an observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoonApparentPosition {
    pub altitude: f64,
    pub azimuth: f64,
    /// km.
    pub distance: f64,
    pub phase: f64,
    pub illumination: f64,
}

impl MoonApparentPosition {
    const FALLBACK: MoonApparentPosition = MoonApparentPosition {
        altitude: 0.0,
        azimuth: 0.0,
        distance: MEAN_DISTANCE_KM,
        phase: 0.0,
        illumination: 0.0,
    };
}

/// Geocentric ecliptic position of the moon; falls back to `{0, 0, 0.00257 AU}`.
pub fn moon_ecliptic_position<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    time: DateTime<FixedOffset>,
) -> Derived<Ecliptic, AstroError> {
    Derived::or_fallback(
        ephemeris.geocentric_ecliptic(Body::Moon, AstroTime::from_datetime(&time)),
        FALLBACK_ECLIPTIC,
        "moon ecliptic position",
    )
}

/// Phase, age and illumination; falls back to all zeros.
pub fn moon_phase<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    time: DateTime<FixedOffset>,
) -> Derived<MoonPhase, AstroError> {
    Derived::or_fallback(
        ephemeris
            .moon_phase_angle(AstroTime::from_datetime(&time))
            .map(MoonPhase::from_angle),
        MoonPhase::UNKNOWN,
        "moon phase",
    )
}

/// Position and phase bundled for display.
pub fn moon_data<E: Ephemeris + ?Sized>(ephemeris: &E, time: DateTime<FixedOffset>) -> MoonData {
    let position = moon_ecliptic_position(ephemeris, time).into_value();
    let phase = moon_phase(ephemeris, time).into_value();
    MoonData {
        name: Body::Moon.name(),
        chinese_name: Body::Moon.chinese_name(),
        color: "#F0F0F0",
        magnitude: -12.6,
        ecliptic_longitude: position.longitude,
        ecliptic_latitude: position.latitude,
        distance_from_earth: position.distance * KM_PER_AU,
        phase: phase.phase,
        age: phase.age,
    }
}

/// Tilt and shift of the lunar orbit ring.
///
/// The node is placed a quarter turn behind the moon, which is a display
/// convention rather than the true node.
pub fn white_path_parameters<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    time: DateTime<FixedOffset>,
) -> Derived<WhitePath, AstroError> {
    let result = ephemeris
        .geocentric_ecliptic(Body::Moon, AstroTime::from_datetime(&time))
        .map(|moon| {
            let ascending_node = normalize_degrees(moon.longitude - 90.0);
            WhitePath {
                inclination: LUNAR_INCLINATION,
                ascending_node,
                offset_distance: WHITE_PATH_OFFSET,
                offset_angle: normalize_degrees(ascending_node + 180.0),
            }
        });
    Derived::or_fallback(result, WhitePath::FALLBACK, "white path parameters")
}

/// Rotate ecliptic coordinates into the frame of an orbit with the given
/// inclination and ascending node.
pub fn ecliptic_to_white_path(
    longitude: f64,
    latitude: f64,
    inclination: f64,
    ascending_node: f64,
) -> WhitePathCoords {
    let lon = (longitude - ascending_node).to_radians();
    let lat = latitude.to_radians();
    let inc = inclination.to_radians();

    let path_lon = (lon.sin() * inc.cos() - lat.tan() * inc.sin())
        .atan2(lon.cos())
        .to_degrees()
        + ascending_node;
    let path_lat = (lat.sin() * inc.cos() + lat.cos() * inc.sin() * lon.sin())
        .asin()
        .to_degrees();

    WhitePathCoords {
        longitude: normalize_degrees(path_lon),
        latitude: path_lat,
    }
}

fn apparent_position<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    time: AstroTime,
    observer: &Observer,
) -> Result<MoonApparentPosition> {
    let equatorial = ephemeris.equatorial(Body::Moon, time, observer)?;
    let horizontal = ephemeris.horizontal(time, observer, &equatorial)?;
    let distance = ephemeris.geocentric_ecliptic(Body::Moon, time)?.distance * KM_PER_AU;
    let phase = MoonPhase::from_angle(ephemeris.moon_phase_angle(time)?);
    Ok(MoonApparentPosition {
        altitude: horizontal.altitude,
        azimuth: horizontal.azimuth,
        distance,
        phase: phase.phase,
        illumination: phase.illumination,
    })
}

/// Altitude, azimuth, distance and phase for an observer (default Beijing).
pub fn moon_apparent_position<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    time: DateTime<FixedOffset>,
    observer: Option<&Observer>,
) -> Derived<MoonApparentPosition, AstroError> {
    Derived::or_fallback(
        apparent_position(
            ephemeris,
            AstroTime::from_datetime(&time),
            observer.unwrap_or(&Observer::DEFAULT),
        ),
        MoonApparentPosition::FALLBACK,
        "moon apparent position",
    )
}

/// Traditional Chinese phase name using the finer angle buckets.
///
/// Unlike [`moon_phase_name`](crate::moon_phase_name), the last stretch
/// before new moon is labelled 蛾眉月 rather than 残月.
pub fn moon_phase_chinese_name(phase: f64) -> &'static str {
    let angle = phase * 360.0;
    match angle {
        a if a < 1.8 || a > 358.2 => "朔（新月）",
        a if a < 44.1 => "蛾眉月",
        a if a < 90.0 => "上弦月",
        a if a < 135.9 => "盈凸月",
        a if a < 180.1 => "望（满月）",
        a if a < 225.9 => "亏凸月",
        a if a < 270.0 => "下弦月",
        a if a < 315.9 => "残月",
        _ => "蛾眉月",
    }
}
