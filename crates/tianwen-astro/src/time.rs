//! Julian dates.
//!
//! Astronomy works in continuous day counts rather than calendar fields.
//! [`AstroTime`] wraps a Julian Date in UT and derives the Terrestrial Time
//! quantities the analytic series need from a fixed ΔT.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian Date of 1970-01-01 00:00 UTC.
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Days in a Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// TT − UT in seconds. Held constant; good to about a minute around 2000-2050.
pub const DELTA_T_SECONDS: f64 = 69.0;

const SECONDS_PER_DAY: f64 = 86_400.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// An instant expressed as a Julian Date in UT.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct AstroTime {
    jd_ut: f64,
}

impl AstroTime {
    /// Wrap a Julian Date in UT.
    pub const fn from_jd_ut(jd_ut: f64) -> Self {
        Self { jd_ut }
    }

    /// Wrap a Julian Ephemeris Date (TT).
    pub fn from_jd_tt(jd_tt: f64) -> Self {
        Self {
            jd_ut: jd_tt - DELTA_T_SECONDS / SECONDS_PER_DAY,
        }
    }

    /// Convert a calendar instant in any zone.
    pub fn from_datetime<Tz: TimeZone>(time: &DateTime<Tz>) -> Self {
        Self {
            jd_ut: UNIX_EPOCH_JD + time.timestamp_millis() as f64 / MILLIS_PER_DAY,
        }
    }

    /// Julian Date in UT.
    pub fn jd_ut(self) -> f64 {
        self.jd_ut
    }

    /// Julian Ephemeris Date (TT).
    pub fn jd_tt(self) -> f64 {
        self.jd_ut + DELTA_T_SECONDS / SECONDS_PER_DAY
    }

    /// Julian centuries of TT since J2000.0.
    pub fn centuries(self) -> f64 {
        (self.jd_tt() - J2000_JD) / DAYS_PER_CENTURY
    }

    /// Julian centuries of UT since J2000.0.
    pub fn centuries_ut(self) -> f64 {
        (self.jd_ut - J2000_JD) / DAYS_PER_CENTURY
    }

    /// Days of UT since J2000.0.
    pub fn days_since_j2000(self) -> f64 {
        self.jd_ut - J2000_JD
    }

    /// Decimal Julian year, close enough for range checks.
    pub fn year(self) -> f64 {
        2000.0 + (self.jd_ut - J2000_JD) / 365.25
    }

    /// Shift by a (possibly fractional, possibly negative) number of days.
    pub fn add_days(self, days: f64) -> Self {
        Self {
            jd_ut: self.jd_ut + days,
        }
    }

    /// Back to a UTC instant, to the millisecond.
    ///
    /// Returns `None` when the date is outside chrono's range or not finite.
    pub fn to_utc(self) -> Option<DateTime<Utc>> {
        let millis = ((self.jd_ut - UNIX_EPOCH_JD) * MILLIS_PER_DAY).round();
        if !millis.is_finite() {
            return None;
        }
        DateTime::from_timestamp_millis(millis as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_epoch() {
        let epoch = DateTime::from_timestamp(0, 0).unwrap();
        assert_eq!(AstroTime::from_datetime(&epoch).jd_ut(), UNIX_EPOCH_JD);
    }

    #[test]
    fn test_j2000_noon() {
        let t = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(AstroTime::from_datetime(&t).jd_ut(), J2000_JD);
    }

    #[test]
    fn test_offset_does_not_change_instant() {
        let local = DateTime::parse_from_rfc3339("2024-01-01T20:00:00+08:00").unwrap();
        let utc = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(
            AstroTime::from_datetime(&local),
            AstroTime::from_datetime(&utc)
        );
    }

    #[test]
    fn test_tt_is_ahead_of_ut() {
        let t = AstroTime::from_jd_ut(J2000_JD);
        assert!((t.jd_tt() - t.jd_ut() - 69.0 / 86_400.0).abs() < 1e-12);
        let back = AstroTime::from_jd_tt(t.jd_tt());
        assert!((back.jd_ut() - J2000_JD).abs() < 1e-9);
    }

    #[test]
    fn test_round_trip_to_utc() {
        let t = Utc.with_ymd_and_hms(2024, 2, 10, 7, 59, 0).unwrap();
        assert_eq!(AstroTime::from_datetime(&t).to_utc(), Some(t));
        assert_eq!(AstroTime::from_jd_ut(f64::NAN).to_utc(), None);
    }
}
