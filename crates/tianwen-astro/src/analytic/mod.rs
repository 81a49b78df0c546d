//! An [`Ephemeris`] built from classic low-precision analytic series.
//!
//! Good to a few arcminutes for the sun and moon and to a fraction of a
//! degree for the planets, which is far beyond what a dashboard dial can
//! show.

pub(crate) mod kepler;
pub(crate) mod lunar;
pub(crate) mod lunation;
pub(crate) mod sidereal;
pub(crate) mod sun;

use tianwen_core::{Body, Observer, normalize_degrees};

use crate::coords::{Ecliptic, Equatorial, ecliptic_to_equatorial, topocentric};
use crate::ephemeris::Ephemeris;
use crate::error::{AstroError, Result, finite};
use crate::time::AstroTime;

/// Earliest year the series are trusted for.
pub const MIN_YEAR: i32 = -1000;
/// Latest year the series are trusted for.
pub const MAX_YEAR: i32 = 3000;

/// The in-tree ephemeris. Stateless and free to copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self
    }
}

fn check_epoch(time: AstroTime) -> Result<f64> {
    finite(time.jd_ut(), "julian date")?;
    let year = time.year().floor();
    if year < f64::from(MIN_YEAR) || year > f64::from(MAX_YEAR) {
        return Err(AstroError::UnsupportedEpoch { year: year as i32 });
    }
    Ok(time.centuries())
}

fn check_observer(observer: &Observer) -> Result<()> {
    if observer.is_valid() {
        Ok(())
    } else {
        Err(AstroError::InvalidObserver {
            latitude: observer.latitude,
            longitude: observer.longitude,
        })
    }
}

fn check_ecliptic(ecliptic: Ecliptic) -> Result<Ecliptic> {
    finite(ecliptic.longitude, "ecliptic longitude")?;
    finite(ecliptic.latitude, "ecliptic latitude")?;
    finite(ecliptic.distance, "distance")?;
    Ok(ecliptic)
}

impl Ephemeris for AnalyticEphemeris {
    fn geocentric_ecliptic(&self, body: Body, time: AstroTime) -> Result<Ecliptic> {
        let t = check_epoch(time)?;
        let nutation = sidereal::nutation(t).longitude;

        let mut ecliptic = match body {
            Body::Sun => {
                let sun = sun::sun(t);
                Ecliptic {
                    longitude: sun.aberrated_longitude(),
                    latitude: 0.0,
                    distance: sun.distance,
                }
            }
            Body::Moon => lunar::moon(t),
            planet => kepler::geocentric(planet, t).ok_or(AstroError::UnsupportedBody { body })?,
        };
        ecliptic.longitude = normalize_degrees(ecliptic.longitude + nutation);
        check_ecliptic(ecliptic)
    }

    fn heliocentric_ecliptic(&self, body: Body, time: AstroTime) -> Result<Ecliptic> {
        let t = check_epoch(time)?;
        let ecliptic = match body {
            Body::Sun => Ecliptic {
                longitude: 0.0,
                latitude: 0.0,
                distance: 0.0,
            },
            Body::Moon => {
                let earth = kepler::earth_heliocentric(t).to_rectangular();
                let moon = lunar::moon(t).to_rectangular();
                Ecliptic::from_rectangular([
                    earth[0] + moon[0],
                    earth[1] + moon[1],
                    earth[2] + moon[2],
                ])
            }
            planet => kepler::heliocentric(planet, t).ok_or(AstroError::UnsupportedBody { body })?,
        };
        check_ecliptic(ecliptic)
    }

    fn equatorial(&self, body: Body, time: AstroTime, observer: &Observer) -> Result<Equatorial> {
        check_observer(observer)?;
        let t = check_epoch(time)?;
        let ecliptic = self.geocentric_ecliptic(body, time)?;
        let geocentric = ecliptic_to_equatorial(&ecliptic, sidereal::true_obliquity(t));
        let lst = self.local_sidereal_time(time, observer)?;

        let equatorial = topocentric(&geocentric, lst, observer);
        finite(equatorial.right_ascension, "right ascension")?;
        finite(equatorial.declination, "declination")?;
        Ok(equatorial)
    }

    fn local_sidereal_time(&self, time: AstroTime, observer: &Observer) -> Result<f64> {
        check_observer(observer)?;
        check_epoch(time)?;
        finite(
            normalize_degrees(sidereal::gast(time) + observer.longitude),
            "sidereal time",
        )
    }

    fn new_moon(&self, k: i64) -> Result<AstroTime> {
        let time = AstroTime::from_jd_tt(lunation::new_moon_jde(k));
        check_epoch(time)?;
        Ok(time)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> AstroTime {
        AstroTime::from_datetime(&Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap())
    }

    #[test]
    fn test_sun_apparent_longitude() {
        // 1992-10-13 00:00 TD, apparent longitude 199.90606
        let time = AstroTime::from_jd_tt(2_448_908.5);
        let lon = AnalyticEphemeris.sun_apparent_longitude(time).unwrap();
        assert!((lon - 199.906_06).abs() < 5e-3, "{lon}");
    }

    #[test]
    fn test_equinox_and_solstice() {
        // 2024-03-20 03:06 UT March equinox, 2024-12-21 09:20 UT December solstice
        let eq = AnalyticEphemeris.sun_apparent_longitude(at(2024, 3, 20, 3, 6)).unwrap();
        assert!(eq < 0.03 || eq > 359.97, "{eq}");
        let sol = AnalyticEphemeris.sun_apparent_longitude(at(2024, 12, 21, 9, 20)).unwrap();
        assert!((sol - 270.0).abs() < 0.03, "{sol}");
    }

    #[test]
    fn test_invalid_observer_rejected() {
        let bad = Observer::new(95.0, 0.0, 0.0);
        let err = AnalyticEphemeris
            .equatorial(Body::Sun, at(2024, 1, 1, 0, 0), &bad)
            .unwrap_err();
        assert!(matches!(err, AstroError::InvalidObserver { .. }));
    }

    #[test]
    fn test_epoch_range() {
        let far = AstroTime::from_jd_ut(2_451_545.0 + 365.25 * 2000.0);
        assert_eq!(
            AnalyticEphemeris.geocentric_ecliptic(Body::Sun, far),
            Err(AstroError::UnsupportedEpoch { year: 4000 })
        );
        let nan = AstroTime::from_jd_ut(f64::NAN);
        assert!(AnalyticEphemeris.geocentric_ecliptic(Body::Moon, nan).is_err());
    }

    #[test]
    fn test_sun_transits_near_local_noon() {
        // Greenwich, 2024-06-21: equation of time is about -1.6 minutes
        let greenwich = Observer::new(51.4769, 0.0, 0.0);
        let time = at(2024, 6, 21, 12, 2);
        let eq = AnalyticEphemeris.equatorial(Body::Sun, time, &greenwich).unwrap();
        let lst = AnalyticEphemeris.local_sidereal_time(time, &greenwich).unwrap();
        let hour_angle = normalize_degrees(lst - eq.right_ascension);
        assert!(hour_angle < 0.5 || hour_angle > 359.5, "{hour_angle}");
    }

    #[test]
    fn test_full_moon_phase_angle() {
        // full moon of 2024-01-25 17:54 UT
        let angle = AnalyticEphemeris.moon_phase_angle(at(2024, 1, 25, 17, 54)).unwrap();
        assert!((angle - 180.0).abs() < 0.5, "{angle}");
    }

    #[test]
    fn test_lunation_lookup() {
        // new moon of 2024-02-09 22:59 UT
        let before = at(2024, 2, 9, 22, 0);
        let after = at(2024, 2, 10, 0, 0);
        let k_before = AnalyticEphemeris.lunation_at(before).unwrap();
        let k_after = AnalyticEphemeris.lunation_at(after).unwrap();
        assert_eq!(k_after, k_before + 1);

        let new_moon = AnalyticEphemeris.new_moon(k_after).unwrap();
        assert!(new_moon > before && new_moon <= after);
    }

    #[test]
    fn test_moon_is_geocentric_only_near_earth() {
        let time = at(2024, 1, 1, 0, 0);
        let moon = AnalyticEphemeris.heliocentric_ecliptic(Body::Moon, time).unwrap();
        let earth_sun = AnalyticEphemeris.geocentric_ecliptic(Body::Sun, time).unwrap();
        assert!((moon.distance - earth_sun.distance).abs() < 0.003);
    }
}
