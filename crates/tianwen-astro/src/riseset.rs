//! Rise and set search.
//!
//! Altitude is sampled on a coarse grid from the start time and the first
//! bracketed horizon crossing is refined by bisection.

use tianwen_core::{Body, Observer};

use crate::ephemeris::Ephemeris;
use crate::error::Result;
use crate::time::AstroTime;

/// Apparent altitude of the upper limb at rise/set: 34' refraction plus a 16'
/// semidiameter.
pub const HORIZON_ALTITUDE_DEG: f64 = -0.8333;

const STEP_DAYS: f64 = 10.0 / 1440.0;
const BISECTION_STEPS: usize = 30;

/// Which horizon crossing to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    Rise,
    Set,
}

fn altitude<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    body: Body,
    observer: &Observer,
    time: AstroTime,
) -> Result<f64> {
    let equatorial = ephemeris.equatorial(body, time, observer)?;
    let horizontal = ephemeris.horizontal(time, observer, &equatorial)?;
    Ok(horizontal.altitude - HORIZON_ALTITUDE_DEG)
}

/// First rise or set of `body` within `limit_days` after `start`.
///
/// Returns `Ok(None)` when the body does not cross the horizon in that
/// window, e.g. during polar day.
pub fn search_rise_set<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    body: Body,
    observer: &Observer,
    crossing: Crossing,
    start: AstroTime,
    limit_days: f64,
) -> Result<Option<AstroTime>> {
    let end = start.add_days(limit_days);
    let is_crossing = |before: f64, after: f64| match crossing {
        Crossing::Rise => before < 0.0 && after >= 0.0,
        Crossing::Set => before >= 0.0 && after < 0.0,
    };

    let mut t0 = start;
    let mut alt0 = altitude(ephemeris, body, observer, t0)?;
    while t0 < end {
        let t1 = if t0.add_days(STEP_DAYS) < end {
            t0.add_days(STEP_DAYS)
        } else {
            end
        };
        let alt1 = altitude(ephemeris, body, observer, t1)?;

        if is_crossing(alt0, alt1) {
            let (mut lo, mut hi) = (t0.jd_ut(), t1.jd_ut());
            for _ in 0..BISECTION_STEPS {
                let mid = 0.5 * (lo + hi);
                let alt = altitude(ephemeris, body, observer, AstroTime::from_jd_ut(mid))?;
                if is_crossing(alt0, alt) {
                    hi = mid;
                } else {
                    lo = mid;
                }
            }
            return Ok(Some(AstroTime::from_jd_ut(hi)));
        }

        t0 = t1;
        alt0 = alt1;
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Timelike, Utc};

    use super::*;
    use crate::AnalyticEphemeris;

    #[test]
    fn test_beijing_sunrise_and_sunset() {
        // 2024-06-21 in Beijing: sunrise 04:46, sunset 19:46 (UTC+8)
        let beijing = Observer::DEFAULT;
        let start = AstroTime::from_datetime(&Utc.with_ymd_and_hms(2024, 6, 20, 16, 0, 0).unwrap());

        let rise = search_rise_set(&AnalyticEphemeris, Body::Sun, &beijing, Crossing::Rise, start, 1.0)
            .unwrap()
            .and_then(AstroTime::to_utc)
            .unwrap();
        let set = search_rise_set(&AnalyticEphemeris, Body::Sun, &beijing, Crossing::Set, start, 1.0)
            .unwrap()
            .and_then(AstroTime::to_utc)
            .unwrap();

        let minutes = |h: u32, m: u32| i64::from(h * 60 + m);
        let rise_min = minutes(rise.hour(), rise.minute());
        let set_min = minutes(set.hour(), set.minute());
        // 04:46 local is 20:46 UTC the day before, 19:46 local is 11:46 UTC
        assert!((rise_min - minutes(20, 46)).abs() <= 3, "{rise}");
        assert!((set_min - minutes(11, 46)).abs() <= 3, "{set}");
    }

    #[test]
    fn test_polar_night_has_no_sunrise() {
        let svalbard = Observer::new(80.0, 20.0, 0.0);
        let start = AstroTime::from_datetime(&Utc.with_ymd_and_hms(2024, 12, 21, 0, 0, 0).unwrap());
        let rise = search_rise_set(
            &AnalyticEphemeris,
            Body::Sun,
            &svalbard,
            Crossing::Rise,
            start,
            1.0,
        )
        .unwrap();
        assert!(rise.is_none());
    }
}
