//! Calendar labels from cycle arithmetic alone.
//!
//! Approximate by construction. Solar terms are spaced exactly 15 days from
//! a 22 December anchor, lunar months follow the mean synodic month and are
//! never leap, and the year pillar turns over on 1 January. Expect the
//! results to disagree with [`AstronomicalCalendar`] by a day or so around
//! term and month boundaries, and by a whole month in leap years.
//!
//! [`AstronomicalCalendar`]: crate::AstronomicalCalendar

use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, Timelike};
use tianwen_astro::SYNODIC_MONTH_DAYS;
use tianwen_core::CalendarModelKind;

use crate::cycle::SixtyCycle;
use crate::error::{CalendarError, Result};
use crate::info::{GanzhiInfo, LunarDate, SolarTermInfo};
use crate::model::CalendarModel;
use crate::pillars::{hour_cycle, julian_day_number, month_cycle, solar_term_info, year_cycle};

/// Mean new moon of 2000-01-06, as a Julian date in UT.
const MEAN_NEW_MOON_JD: f64 = 2_451_550.26;

/// Julian day number of 1900-01-01, counted as a 甲子 day.
const DAY_CYCLE_EPOCH_JDN: i64 = 2_415_021;

/// UTC+8 as a fraction of a day.
const CHINA_OFFSET_DAYS: f64 = 8.0 / 24.0;

const TERM_DAYS: i64 = 15;

/// Days after the solstice anchor that always fall in the first month.
const FIRST_MONTH_OFFSET_DAYS: u64 = 60;

/// Closed-form calendar. Needs no ephemeris and cannot fail for ordinary dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApproximateCalendar;

impl ApproximateCalendar {
    /// The 22 December on or before `date`.
    fn solstice_anchor(date: NaiveDate) -> Result<NaiveDate> {
        let year = if (date.month(), date.day()) >= (12, 22) {
            date.year()
        } else {
            date.year() - 1
        };
        NaiveDate::from_ymd_opt(year, 12, 22).ok_or(CalendarError::YearOutOfRange { year })
    }

    fn term_index(date: NaiveDate) -> Result<u8> {
        let days = (date - Self::solstice_anchor(date)?).num_days();
        Ok((days / TERM_DAYS).min(23) as u8)
    }

    fn day_cycle(date: NaiveDate) -> SixtyCycle {
        SixtyCycle::from_index(julian_day_number(date) - DAY_CYCLE_EPOCH_JDN)
    }

    fn mean_new_moon_day(n: i64) -> i64 {
        (MEAN_NEW_MOON_JD + n as f64 * SYNODIC_MONTH_DAYS + 0.5 + CHINA_OFFSET_DAYS).floor() as i64
    }

    /// The mean lunation whose first day is on or before `jdn`.
    fn mean_lunation_of_day(jdn: i64) -> i64 {
        let end_of_day = jdn as f64 + 0.5 - CHINA_OFFSET_DAYS;
        let mut n = ((end_of_day - MEAN_NEW_MOON_JD) / SYNODIC_MONTH_DAYS).floor() as i64;
        if Self::mean_new_moon_day(n) > jdn {
            n -= 1;
        }
        n
    }

    /// The lunation numbered 1 in the lunar year that starts in `year`.
    fn first_month(year: i32) -> Result<i64> {
        let inside = NaiveDate::from_ymd_opt(year - 1, 12, 22)
            .and_then(|anchor| anchor.checked_add_days(Days::new(FIRST_MONTH_OFFSET_DAYS)))
            .ok_or(CalendarError::YearOutOfRange { year })?;
        Ok(Self::mean_lunation_of_day(julian_day_number(inside)))
    }

    fn lunar_date_of(date: NaiveDate) -> Result<LunarDate> {
        let jdn = julian_day_number(date);
        let n = Self::mean_lunation_of_day(jdn);

        let mut year = date.year();
        let mut first = Self::first_month(year)?;
        if n < first {
            year -= 1;
            first = Self::first_month(year)?;
        }

        Ok(LunarDate {
            year: year_cycle(year),
            month: (n - first + 1).min(12) as u8,
            day: (jdn - Self::mean_new_moon_day(n) + 1) as u8,
            leap: false,
        })
    }
}

impl CalendarModel for ApproximateCalendar {
    fn kind(&self) -> CalendarModelKind {
        CalendarModelKind::Approximate
    }

    fn try_ganzhi(&self, time: DateTime<FixedOffset>) -> Result<GanzhiInfo> {
        let date = time.date_naive();
        let day = Self::day_cycle(date);
        Ok(GanzhiInfo::from_cycles(
            year_cycle(date.year()),
            month_cycle(date, Self::term_index(date)?),
            day,
            hour_cycle(day, time.hour()),
        ))
    }

    fn try_solar_term(&self, time: DateTime<FixedOffset>) -> Result<SolarTermInfo> {
        solar_term_info(time.date_naive(), Self::term_index)
    }

    fn try_lunar_date(&self, time: DateTime<FixedOffset>) -> Result<LunarDate> {
        Self::lunar_date_of(time.date_naive())
    }
}
