//! Sidereal time, obliquity and nutation.
//!
//! Sources:
//! - GMST polynomial: IAU 1982, as given in Meeus, Astronomical Algorithms, eq. 12.4.
//! - Mean obliquity: Meeus eq. 22.2.
//! - Nutation: the four leading terms of the IAU 1980 series (Meeus ch. 22).

use tianwen_core::normalize_degrees;

use crate::time::{AstroTime, J2000_JD};

/// Nutation in longitude and obliquity, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Nutation {
    pub longitude: f64,
    pub obliquity: f64,
}

/// Leading nutation terms at `t` Julian centuries of TT.
///
/// Good to about half an arcsecond.
pub(crate) fn nutation(t: f64) -> Nutation {
    let node = (125.04452 - 1934.136261 * t).to_radians();
    let sun = (280.4665 + 36000.7698 * t).to_radians();
    let moon = (218.3165 + 481_267.8813 * t).to_radians();

    let longitude_arcsec = -17.20 * node.sin() - 1.32 * (2.0 * sun).sin()
        - 0.23 * (2.0 * moon).sin()
        + 0.21 * (2.0 * node).sin();
    let obliquity_arcsec = 9.20 * node.cos() + 0.57 * (2.0 * sun).cos()
        + 0.10 * (2.0 * moon).cos()
        - 0.09 * (2.0 * node).cos();

    Nutation {
        longitude: longitude_arcsec / 3600.0,
        obliquity: obliquity_arcsec / 3600.0,
    }
}

/// Mean obliquity of the ecliptic in degrees.
pub(crate) fn mean_obliquity(t: f64) -> f64 {
    23.439_291_111 - 0.013_004_167 * t - 1.639e-7 * t * t + 5.036e-7 * t * t * t
}

/// Obliquity including nutation.
pub(crate) fn true_obliquity(t: f64) -> f64 {
    mean_obliquity(t) + nutation(t).obliquity
}

/// Greenwich Mean Sidereal Time in degrees, `[0, 360)`.
pub(crate) fn gmst(time: AstroTime) -> f64 {
    let d = time.jd_ut() - J2000_JD;
    let t = time.centuries_ut();
    normalize_degrees(
        280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t - t * t * t / 38_710_000.0,
    )
}

/// Greenwich Apparent Sidereal Time in degrees, `[0, 360)`.
pub(crate) fn gast(time: AstroTime) -> f64 {
    let t = time.centuries();
    let n = nutation(t);
    let eps = (mean_obliquity(t) + n.obliquity).to_radians();
    normalize_degrees(gmst(time) + n.longitude * eps.cos())
}
