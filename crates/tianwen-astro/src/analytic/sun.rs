//! Low-precision solar coordinates (Meeus, Astronomical Algorithms, ch. 25).
//!
//! Accurate to about 0.01° in longitude between 1800 and 2200.

use tianwen_core::normalize_degrees;

/// Annual aberration constant, degrees at 1 AU.
const ABERRATION_DEG: f64 = 20.4898 / 3600.0;

/// Geometric position of the sun, mean equinox of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SolarPosition {
    /// True geometric longitude in degrees.
    pub longitude: f64,
    /// Distance from the Earth in AU.
    pub distance: f64,
}

impl SolarPosition {
    /// Longitude shifted by annual aberration.
    pub fn aberrated_longitude(&self) -> f64 {
        normalize_degrees(self.longitude - ABERRATION_DEG / self.distance)
    }
}

/// Sun position at `t` Julian centuries of TT.
pub(crate) fn sun(t: f64) -> SolarPosition {
    let l0 = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let m = 357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t;
    let e = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t * t;

    let m_rad = m.to_radians();
    let center = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m_rad.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m_rad).sin()
        + 0.000_289 * (3.0 * m_rad).sin();

    let true_anomaly = (m + center).to_radians();
    let distance = 1.000_001_018 * (1.0 - e * e) / (1.0 + e * true_anomaly.cos());

    SolarPosition {
        longitude: normalize_degrees(l0 + center),
        distance,
    }
}
