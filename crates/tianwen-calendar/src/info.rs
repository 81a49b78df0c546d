//! Records handed to the display.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::cycle::SixtyCycle;

/// Lunar date shown when the lunar date alone cannot be derived.
pub const LUNAR_DATE_FAILED: &str = "农历日期计算失败";

/// Lunar date shown when the calendar bundle cannot be derived.
pub const CALENDAR_INFO_FAILED: &str = "农历信息获取失败";

const MONTH_NAMES: [&str; 12] = [
    "正月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月", "十一月",
    "十二月",
];

const DAY_NAMES: [&str; 30] = [
    "初一", "初二", "初三", "初四", "初五", "初六", "初七", "初八", "初九", "初十", "十一", "十二",
    "十三", "十四", "十五", "十六", "十七", "十八", "十九", "二十", "廿一", "廿二", "廿三", "廿四",
    "廿五", "廿六", "廿七", "廿八", "廿九", "三十",
];

/// A stem-branch pair spelled out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pillar {
    pub stem: &'static str,
    pub branch: &'static str,
    pub full: String,
}

impl From<SixtyCycle> for Pillar {
    fn from(cycle: SixtyCycle) -> Self {
        Self {
            stem: cycle.stem_name(),
            branch: cycle.branch_name(),
            full: cycle.to_string(),
        }
    }
}

/// The year pillar with its element and zodiac animal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearPillar {
    #[serde(flatten)]
    pub pillar: Pillar,
    pub element: &'static str,
    pub animal: &'static str,
}

/// The day pillar with its element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayPillar {
    #[serde(flatten)]
    pub pillar: Pillar,
    pub element: &'static str,
}

/// Year, month, day and hour pillars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GanzhiInfo {
    pub year: YearPillar,
    pub month: Pillar,
    pub day: DayPillar,
    pub hour: Pillar,
}

impl GanzhiInfo {
    pub fn from_cycles(year: SixtyCycle, month: SixtyCycle, day: SixtyCycle, hour: SixtyCycle) -> Self {
        Self {
            year: YearPillar {
                pillar: year.into(),
                element: year.element(),
                animal: year.zodiac(),
            },
            month: month.into(),
            day: DayPillar {
                pillar: day.into(),
                element: day.element(),
            },
            hour: hour.into(),
        }
    }

    /// Every pillar 甲子 (木, 鼠).
    pub fn fallback() -> Self {
        Self::from_cycles(
            SixtyCycle::JIAZI,
            SixtyCycle::JIAZI,
            SixtyCycle::JIAZI,
            SixtyCycle::JIAZI,
        )
    }
}

/// The solar term a day falls in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolarTermInfo {
    pub name: &'static str,
    /// 0 is 冬至, 23 is 大雪.
    pub index: u8,
    /// Whether the term begins on this day, judged against the previous
    /// day's term. This is the day the term's longitude is crossed, not the
    /// eve before it.
    pub is_start: bool,
    pub next_term_name: &'static str,
    /// Days until the next term begins, at most 30.
    pub days_to_next: u32,
}

/// A day of the lunisolar calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LunarDate {
    /// Stem-branch name of the lunar year.
    pub year: SixtyCycle,
    /// 1 to 12.
    pub month: u8,
    /// 1 to 30.
    pub day: u8,
    /// Whether this is an intercalary month.
    pub leap: bool,
}

impl LunarDate {
    /// 正月 to 十二月, prefixed with 闰 for a leap month.
    pub fn month_name(&self) -> String {
        let name = MONTH_NAMES[usize::from(self.month.clamp(1, 12) - 1)];
        if self.leap {
            format!("闰{name}")
        } else {
            name.to_string()
        }
    }

    /// 初一 to 三十.
    pub fn day_name(&self) -> &'static str {
        DAY_NAMES[usize::from(self.day.clamp(1, 30) - 1)]
    }
}

/// Formats as `农历甲辰年正月初一`.
impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "农历{}年{}{}", self.year, self.month_name(), self.day_name())
    }
}

/// Everything the info panel shows about the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChineseCalendarInfo {
    /// Gregorian date as `YYYY/M/D`.
    pub solar_date: String,
    pub lunar_date: String,
    pub solar_term: Option<SolarTermInfo>,
    pub ganzhi: GanzhiInfo,
}

/// `2024/2/10` style.
pub fn format_solar_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.year(), date.month(), date.day())
}

/// One line about the solar term: today's term, or the wait for the next.
pub fn solar_term_description(term: &SolarTermInfo) -> String {
    if term.is_start {
        format!("今日{}", term.name)
    } else {
        format!("距离{}还有{}天", term.next_term_name, term.days_to_next)
    }
}
