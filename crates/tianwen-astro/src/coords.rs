//! Coordinate frames and conversions between them.
//!
//! All angles are degrees. Ecliptic and equatorial distances are in AU.

use serde::Serialize;
use tianwen_core::{Observer, normalize_degrees};

/// Kilometres per astronomical unit.
pub const KM_PER_AU: f64 = 149_597_870.7;

/// Spherical ecliptic coordinates of date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ecliptic {
    /// Longitude in `[0, 360)`.
    pub longitude: f64,
    /// Latitude in `[-90, 90]`.
    pub latitude: f64,
    /// Distance in AU.
    pub distance: f64,
}

impl Ecliptic {
    /// Build from rectangular `[x, y, z]` (AU).
    pub fn from_rectangular(xyz: [f64; 3]) -> Self {
        let [x, y, z] = xyz;
        let r = (x * x + y * y + z * z).sqrt();
        if r == 0.0 {
            return Self {
                longitude: 0.0,
                latitude: 0.0,
                distance: 0.0,
            };
        }
        Self {
            longitude: normalize_degrees(y.atan2(x).to_degrees()),
            latitude: (z / r).asin().to_degrees(),
            distance: r,
        }
    }

    /// Rectangular `[x, y, z]` in AU.
    pub fn to_rectangular(&self) -> [f64; 3] {
        let (lon, lat) = (self.longitude.to_radians(), self.latitude.to_radians());
        [
            self.distance * lat.cos() * lon.cos(),
            self.distance * lat.cos() * lon.sin(),
            self.distance * lat.sin(),
        ]
    }
}

/// Right ascension and declination of date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Equatorial {
    /// Right ascension in `[0, 360)`.
    pub right_ascension: f64,
    /// Declination in `[-90, 90]`.
    pub declination: f64,
    /// Distance in AU.
    pub distance: f64,
}

/// Altitude above the horizon and azimuth from north through east.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Horizontal {
    pub altitude: f64,
    /// Azimuth in `[0, 360)`; 90 is due east.
    pub azimuth: f64,
}

/// Rotate ecliptic coordinates into the equator.
pub fn ecliptic_to_equatorial(ecliptic: &Ecliptic, obliquity: f64) -> Equatorial {
    let lon = ecliptic.longitude.to_radians();
    let lat = ecliptic.latitude.to_radians();
    let eps = obliquity.to_radians();

    let ra = (lon.sin() * eps.cos() - lat.tan() * eps.sin()).atan2(lon.cos());
    let dec = (lat.sin() * eps.cos() + lat.cos() * eps.sin() * lon.sin()).asin();

    Equatorial {
        right_ascension: normalize_degrees(ra.to_degrees()),
        declination: dec.to_degrees(),
        distance: ecliptic.distance,
    }
}

/// Horizontal coordinates for an observer given local sidereal time.
pub fn equatorial_to_horizontal(
    equatorial: &Equatorial,
    local_sidereal_time: f64,
    observer: &Observer,
) -> Horizontal {
    let h = (local_sidereal_time - equatorial.right_ascension).to_radians();
    let dec = equatorial.declination.to_radians();
    let lat = observer.latitude.to_radians();

    let altitude = (lat.sin() * dec.sin() + lat.cos() * dec.cos() * h.cos()).asin();
    let azimuth = (-h.sin() * dec.cos()).atan2(dec.sin() * lat.cos() - dec.cos() * lat.sin() * h.cos());

    Horizontal {
        altitude: altitude.to_degrees(),
        azimuth: normalize_degrees(azimuth.to_degrees()),
    }
}

/// Equatorial horizontal parallax of the Earth's radius at 1 AU, in arcseconds.
const SOLAR_PARALLAX_ARCSEC: f64 = 8.794;
/// Polar over equatorial Earth radius.
const EARTH_FLATTENING_RATIO: f64 = 0.996_647_19;
const EARTH_EQUATORIAL_RADIUS_M: f64 = 6_378_140.0;

/// Shift geocentric coordinates to the observer's position on the surface.
pub fn topocentric(
    geocentric: &Equatorial,
    local_sidereal_time: f64,
    observer: &Observer,
) -> Equatorial {
    if geocentric.distance <= 0.0 {
        return *geocentric;
    }
    let lat = observer.latitude.to_radians();
    let u = (EARTH_FLATTENING_RATIO * lat.tan()).atan();
    let height = observer.elevation / EARTH_EQUATORIAL_RADIUS_M;
    let rho_sin = EARTH_FLATTENING_RATIO * u.sin() + height * lat.sin();
    let rho_cos = u.cos() + height * lat.cos();

    let sin_parallax = (SOLAR_PARALLAX_ARCSEC / 3600.0).to_radians().sin() / geocentric.distance;
    let h = (local_sidereal_time - geocentric.right_ascension).to_radians();
    let dec = geocentric.declination.to_radians();

    let denom = dec.cos() - rho_cos * sin_parallax * h.cos();
    let delta_ra = (-rho_cos * sin_parallax * h.sin()).atan2(denom);
    let dec_topo = ((dec.sin() - rho_sin * sin_parallax) * delta_ra.cos()).atan2(denom);

    Equatorial {
        right_ascension: normalize_degrees(geocentric.right_ascension + delta_ra.to_degrees()),
        declination: dec_topo.to_degrees(),
        distance: geocentric.distance,
    }
}
