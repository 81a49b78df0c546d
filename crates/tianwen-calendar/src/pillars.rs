//! Stem-branch arithmetic shared by both calendar models.

use chrono::{Datelike, Days, NaiveDate};

use crate::cycle::{SOLAR_TERMS, SixtyCycle};
use crate::error::{CalendarError, Result};
use crate::info::SolarTermInfo;

/// Julian day number of 0001-01-01 minus one.
const JDN_CE_OFFSET: i64 = 1_721_425;

/// Longest stretch scanned while looking for the next solar term.
const MAX_TERM_SCAN_DAYS: u32 = 30;

/// Index of 立春, the term that opens the ganzhi year.
const BEGINNING_OF_SPRING: u8 = 3;

/// Julian day number of a civil date (the Julian date at its noon).
pub fn julian_day_number(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) + JDN_CE_OFFSET
}

/// Year pillar counted from 4 CE, a 甲子 year.
pub fn year_cycle(year: i32) -> SixtyCycle {
    SixtyCycle::from_index(i64::from(year) - 4)
}

/// Day pillar of a Julian day number. 2024-01-01 is a 甲子 day.
pub fn day_cycle(jdn: i64) -> SixtyCycle {
    SixtyCycle::from_index(jdn + 49)
}

/// Month pillar from the solar term in effect.
///
/// The branch follows the jie terms (小寒 opens 丑, 立春 opens 寅) and the
/// stem follows the year that starts at 立春.
pub fn month_cycle(date: NaiveDate, term_index: u8) -> SixtyCycle {
    let branch = ((term_index + 1) / 2) % 12;
    let solar_year = if date.month() <= 2 && term_index < BEGINNING_OF_SPRING {
        date.year() - 1
    } else {
        date.year()
    };
    let year_stem = year_cycle(solar_year).stem();
    let first_month_stem = (year_stem % 5) * 2 + 2;
    let stem = (first_month_stem + (i32::from(branch) - 2).rem_euclid(12) as u8) % 10;
    SixtyCycle::from_parts(stem, branch).unwrap_or_default()
}

/// Hour pillar. Each branch covers two hours, 子 running 23:00 to 01:00;
/// from 23:00 the stem already follows the next day.
pub fn hour_cycle(day: SixtyCycle, hour: u32) -> SixtyCycle {
    let branch = (((hour + 1) / 2) % 12) as u8;
    let day = if hour >= 23 { day.next(1) } else { day };
    let stem = ((day.stem() % 5) * 2 + branch) % 10;
    SixtyCycle::from_parts(stem, branch).unwrap_or_default()
}

/// Build the solar term record for `date` from a per-day term lookup.
pub fn solar_term_info(
    date: NaiveDate,
    mut term_of: impl FnMut(NaiveDate) -> Result<u8>,
) -> Result<SolarTermInfo> {
    let overflow = || CalendarError::DateOverflow { date };

    let index = term_of(date)?;
    let yesterday = term_of(date.pred_opt().ok_or_else(overflow)?)?;
    let next = (index + 1) % 24;

    let mut days_to_next = 0;
    let mut day = date;
    while days_to_next < MAX_TERM_SCAN_DAYS && term_of(day)? != next {
        day = day.checked_add_days(Days::new(1)).ok_or_else(overflow)?;
        days_to_next += 1;
    }

    Ok(SolarTermInfo {
        name: SOLAR_TERMS[usize::from(index)],
        index,
        is_start: index != yesterday,
        next_term_name: SOLAR_TERMS[usize::from(next)],
        days_to_next,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_julian_day_number() {
        assert_eq!(julian_day_number(ymd(2000, 1, 1)), 2_451_545);
        assert_eq!(julian_day_number(ymd(1970, 1, 1)), 2_440_588);
    }

    #[test]
    fn test_day_cycle_anchors() {
        assert_eq!(day_cycle(julian_day_number(ymd(2024, 1, 1))).to_string(), "甲子");
        assert_eq!(day_cycle(julian_day_number(ymd(2024, 2, 10))).to_string(), "甲辰");
        assert_eq!(day_cycle(julian_day_number(ymd(1900, 1, 1))).to_string(), "甲戌");
    }

    #[test]
    fn test_year_cycle() {
        assert_eq!(year_cycle(2024).to_string(), "甲辰");
        assert_eq!(year_cycle(1984).to_string(), "甲子");
        assert_eq!(year_cycle(4).to_string(), "甲子");
        assert_eq!(year_cycle(3).to_string(), "癸亥");
    }

    #[test]
    fn test_month_cycle() {
        // still the 甲子 month of a 癸 year before 小寒
        assert_eq!(month_cycle(ymd(2024, 1, 1), 0).to_string(), "甲子");
        assert_eq!(month_cycle(ymd(2024, 1, 10), 1).to_string(), "乙丑");
        // 立春 2024 opens 丙寅 in a 甲 year
        assert_eq!(month_cycle(ymd(2024, 2, 4), 3).to_string(), "丙寅");
        assert_eq!(month_cycle(ymd(2024, 12, 10), 23).to_string(), "丙子");
    }

    #[test]
    fn test_hour_cycle() {
        let jiazi = SixtyCycle::JIAZI;
        assert_eq!(hour_cycle(jiazi, 0).to_string(), "甲子");
        assert_eq!(hour_cycle(jiazi, 1).to_string(), "乙丑");
        assert_eq!(hour_cycle(jiazi, 12).to_string(), "庚午");
        assert_eq!(hour_cycle(jiazi, 22).to_string(), "乙亥");
        // 乙丑 day follows, so 23:00 is 丙子
        assert_eq!(hour_cycle(jiazi, 23).to_string(), "丙子");
    }

    #[test]
    fn test_solar_term_info_counts_days() {
        // a term every ten days, starting on day 0 of each decade
        let start = ymd(2024, 1, 1);
        let term_of = |d: NaiveDate| -> Result<u8> {
            Ok(((d - start).num_days().rem_euclid(240) / 10) as u8)
        };

        let info = solar_term_info(ymd(2024, 1, 1), term_of).unwrap();
        assert_eq!(info.index, 0);
        assert!(info.is_start);
        assert_eq!(info.days_to_next, 10);

        let info = solar_term_info(ymd(2024, 1, 4), term_of).unwrap();
        assert!(!info.is_start);
        assert_eq!(info.days_to_next, 7);
        assert_eq!(info.next_term_name, "小寒");
    }

    #[test]
    fn test_solar_term_scan_is_capped() {
        let info = solar_term_info(ymd(2024, 1, 1), |_| Ok(5)).unwrap();
        assert_eq!(info.days_to_next, 30);
        assert!(!info.is_start);
    }
}
