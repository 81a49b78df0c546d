//! The boundary between angle derivation and the astronomy behind it.

use tianwen_core::{Body, Observer, normalize_degrees};

use crate::coords::{Ecliptic, Equatorial, Horizontal, equatorial_to_horizontal};
use crate::error::Result;
use crate::time::AstroTime;

pub use crate::analytic::lunation::{LUNATION_EPOCH_JDE, SYNODIC_MONTH_DAYS};

/// A source of positions for the sun, the moon and the naked-eye planets.
///
/// Angles are degrees and distances AU. Implementors supply the geometric
/// queries; phase, horizontal coordinates and lunation lookup have default
/// implementations in terms of them.
pub trait Ephemeris {
    /// Apparent geocentric ecliptic coordinates of date.
    fn geocentric_ecliptic(&self, body: Body, time: AstroTime) -> Result<Ecliptic>;

    /// Heliocentric ecliptic coordinates of date. The sun is at the origin.
    fn heliocentric_ecliptic(&self, body: Body, time: AstroTime) -> Result<Ecliptic>;

    /// Apparent topocentric right ascension and declination of date.
    fn equatorial(&self, body: Body, time: AstroTime, observer: &Observer) -> Result<Equatorial>;

    /// Local apparent sidereal time in degrees.
    fn local_sidereal_time(&self, time: AstroTime, observer: &Observer) -> Result<f64>;

    /// Instant of the true new moon of lunation `k`, counted from the new moon
    /// of 2000-01-06.
    fn new_moon(&self, k: i64) -> Result<AstroTime>;

    /// Altitude and azimuth of the given equatorial position.
    fn horizontal(
        &self,
        time: AstroTime,
        observer: &Observer,
        equatorial: &Equatorial,
    ) -> Result<Horizontal> {
        let lst = self.local_sidereal_time(time, observer)?;
        Ok(equatorial_to_horizontal(equatorial, lst, observer))
    }

    /// Elongation of the moon east of the sun along the ecliptic, `[0, 360)`.
    ///
    /// 0 is new moon, 180 is full moon.
    fn moon_phase_angle(&self, time: AstroTime) -> Result<f64> {
        let moon = self.geocentric_ecliptic(Body::Moon, time)?;
        let sun = self.geocentric_ecliptic(Body::Sun, time)?;
        Ok(normalize_degrees(moon.longitude - sun.longitude))
    }

    /// Apparent ecliptic longitude of the sun, `[0, 360)`.
    fn sun_apparent_longitude(&self, time: AstroTime) -> Result<f64> {
        Ok(self.geocentric_ecliptic(Body::Sun, time)?.longitude)
    }

    /// The lunation in progress at `time`: the largest `k` whose new moon is
    /// not after `time`.
    fn lunation_at(&self, time: AstroTime) -> Result<i64> {
        let mut k = ((time.jd_tt() - LUNATION_EPOCH_JDE) / SYNODIC_MONTH_DAYS).floor() as i64;
        while self.new_moon(k)? > time {
            k -= 1;
        }
        while self.new_moon(k + 1)? <= time {
            k += 1;
        }
        Ok(k)
    }
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn geocentric_ecliptic(&self, body: Body, time: AstroTime) -> Result<Ecliptic> {
        (**self).geocentric_ecliptic(body, time)
    }

    fn heliocentric_ecliptic(&self, body: Body, time: AstroTime) -> Result<Ecliptic> {
        (**self).heliocentric_ecliptic(body, time)
    }

    fn equatorial(&self, body: Body, time: AstroTime, observer: &Observer) -> Result<Equatorial> {
        (**self).equatorial(body, time, observer)
    }

    fn local_sidereal_time(&self, time: AstroTime, observer: &Observer) -> Result<f64> {
        (**self).local_sidereal_time(time, observer)
    }

    fn new_moon(&self, k: i64) -> Result<AstroTime> {
        (**self).new_moon(k)
    }
}
