//! The lunisolar calendar computed from the sun and the moon.
//!
//! Days are reckoned in China Standard Time (UTC+8). A lunar month starts on
//! the day of a new moon; month 11 is the one containing the winter
//! solstice. When eleven months lie between two winter-solstice months
//! instead of ten, the first month in which the sun enters no new 30°
//! sign (no major term) is the leap month and repeats the number before it.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike};
use tianwen_astro::{AnalyticEphemeris, AstroTime, Ephemeris};
use tianwen_core::CalendarModelKind;

use crate::error::{CalendarError, Result};
use crate::info::{GanzhiInfo, LunarDate, SolarTermInfo};
use crate::model::CalendarModel;
use crate::pillars::{
    day_cycle, hour_cycle, julian_day_number, month_cycle, solar_term_info, year_cycle,
};

/// UTC+8 as a fraction of a day.
const CHINA_OFFSET_DAYS: f64 = 8.0 / 24.0;

/// Apparent solar longitude of the winter solstice, where term 0 starts.
const WINTER_SOLSTICE_DEG: f64 = 270.0;

/// Lunar calendar and pillars from an [`Ephemeris`].
#[derive(Debug, Clone, Default)]
pub struct AstronomicalCalendar<E = AnalyticEphemeris> {
    ephemeris: E,
}

impl<E: Ephemeris> AstronomicalCalendar<E> {
    pub fn new(ephemeris: E) -> Self {
        Self { ephemeris }
    }

    pub fn ephemeris(&self) -> &E {
        &self.ephemeris
    }

    /// Sun longitude at local midnight, `offset` days after the start of day `jdn`.
    fn sun_longitude(&self, jdn: i64, offset: f64) -> Result<f64> {
        let jd_ut = jdn as f64 - 0.5 - CHINA_OFFSET_DAYS + offset;
        Ok(self
            .ephemeris
            .sun_apparent_longitude(AstroTime::from_jd_ut(jd_ut))?)
    }

    /// Solar term in effect at the end of day `jdn`, 0 (冬至) to 23 (大雪).
    fn term_index(&self, jdn: i64) -> Result<u8> {
        let longitude = self.sun_longitude(jdn, 1.0)?;
        let index = ((longitude - WINTER_SOLSTICE_DEG).rem_euclid(360.0) / 15.0).floor();
        Ok((index as u8).min(23))
    }

    /// Major term sign, `0..12`, at the start of day `jdn`.
    fn sign_at_day_start(&self, jdn: i64) -> Result<i64> {
        Ok((self.sun_longitude(jdn, 0.0)? / 30.0).floor() as i64)
    }

    /// Local day on which new moon `k` falls.
    fn new_moon_day(&self, k: i64) -> Result<i64> {
        let time = self.ephemeris.new_moon(k)?;
        Ok((time.jd_ut() + 0.5 + CHINA_OFFSET_DAYS).floor() as i64)
    }

    /// The lunation whose first day is on or before `jdn` and whose
    /// successor starts after it.
    fn lunation_of_day(&self, jdn: i64) -> Result<i64> {
        let end_of_day = AstroTime::from_jd_ut(jdn as f64 + 0.5 - CHINA_OFFSET_DAYS);
        let mut k = self.ephemeris.lunation_at(end_of_day)?;
        if self.new_moon_day(k)? > jdn {
            k -= 1;
        }
        if self.new_moon_day(k + 1)? <= jdn {
            k += 1;
        }
        Ok(k)
    }

    /// The lunation that is month 11 in Gregorian `year`, the one holding
    /// that December's solstice.
    fn winter_solstice_month(&self, year: i32) -> Result<i64> {
        let new_years_eve = NaiveDate::from_ymd_opt(year, 12, 31)
            .map(julian_day_number)
            .ok_or(CalendarError::YearOutOfRange { year })?;
        let k = self.lunation_of_day(new_years_eve)?;
        // a lunation that opens after the solstice is month 12
        if self.sign_at_day_start(self.new_moon_day(k)?)? >= 9 {
            Ok(k - 1)
        } else {
            Ok(k)
        }
    }

    /// Offset from month 11 of the first month without a major term.
    fn leap_month_offset(&self, month_eleven: i64) -> Result<Option<i64>> {
        let mut last = self.sign_at_day_start(self.new_moon_day(month_eleven + 1)?)?;
        for i in 2..14 {
            let sign = self.sign_at_day_start(self.new_moon_day(month_eleven + i)?)?;
            if sign == last {
                return Ok(Some(i - 1));
            }
            last = sign;
        }
        Ok(None)
    }

    fn lunar_date_of(&self, date: NaiveDate) -> Result<LunarDate> {
        let jdn = julian_day_number(date);
        let k = self.lunation_of_day(jdn)?;
        let month_start = self.new_moon_day(k)?;

        let mut lunar_year = date.year();
        let mut eleven = self.winter_solstice_month(lunar_year)?;
        let next_eleven;
        if k <= eleven {
            next_eleven = eleven;
            eleven = self.winter_solstice_month(lunar_year - 1)?;
        } else {
            next_eleven = self.winter_solstice_month(lunar_year + 1)?;
            lunar_year += 1;
        }

        let diff = k - eleven;
        let mut month = diff + 11;
        let mut leap = false;
        if next_eleven - eleven > 12 {
            if let Some(offset) = self.leap_month_offset(eleven)? {
                if diff >= offset {
                    month = diff + 10;
                    leap = diff == offset;
                }
            }
        }
        if month > 12 {
            month -= 12;
        }
        if month >= 11 && diff < 4 {
            lunar_year -= 1;
        }

        Ok(LunarDate {
            year: year_cycle(lunar_year),
            month: month as u8,
            day: (jdn - month_start + 1) as u8,
            leap,
        })
    }
}

impl<E: Ephemeris> CalendarModel for AstronomicalCalendar<E> {
    fn kind(&self) -> CalendarModelKind {
        CalendarModelKind::Astronomical
    }

    fn try_ganzhi(&self, time: DateTime<FixedOffset>) -> Result<GanzhiInfo> {
        let date = time.date_naive();
        let jdn = julian_day_number(date);
        let lunar = self.lunar_date_of(date)?;
        let term = self.term_index(jdn)?;
        let day = day_cycle(jdn);
        Ok(GanzhiInfo::from_cycles(
            lunar.year,
            month_cycle(date, term),
            day,
            hour_cycle(day, time.hour()),
        ))
    }

    fn try_solar_term(&self, time: DateTime<FixedOffset>) -> Result<SolarTermInfo> {
        solar_term_info(time.date_naive(), |day| {
            self.term_index(julian_day_number(day))
        })
    }

    fn try_lunar_date(&self, time: DateTime<FixedOffset>) -> Result<LunarDate> {
        self.lunar_date_of(time.date_naive())
    }
}
