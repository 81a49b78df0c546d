//! The calendar boundary and the strategy chosen at startup.

use chrono::{DateTime, FixedOffset};
use tianwen_astro::{AnalyticEphemeris, Ephemeris};
use tianwen_core::{CalendarModelKind, Derived};

use crate::approximate::ApproximateCalendar;
use crate::astronomical::AstronomicalCalendar;
use crate::error::{CalendarError, Result};
use crate::info::{
    CALENDAR_INFO_FAILED, ChineseCalendarInfo, GanzhiInfo, LUNAR_DATE_FAILED, LunarDate,
    SolarTermInfo, format_solar_date,
};

/// Turns a local date and time into Chinese calendar labels.
///
/// Dates are taken in the offset of the given time. Implementors supply
/// the fallible `try_*` queries; the provided methods never fail and fall
/// back to fixed labels, logging why.
pub trait CalendarModel {
    fn kind(&self) -> CalendarModelKind;

    /// Year, month, day and hour pillars.
    fn try_ganzhi(&self, time: DateTime<FixedOffset>) -> Result<GanzhiInfo>;

    /// The solar term the date falls in.
    fn try_solar_term(&self, time: DateTime<FixedOffset>) -> Result<SolarTermInfo>;

    fn try_lunar_date(&self, time: DateTime<FixedOffset>) -> Result<LunarDate>;

    /// Pillars, or 甲子 throughout.
    fn ganzhi(&self, time: DateTime<FixedOffset>) -> Derived<GanzhiInfo, CalendarError> {
        Derived::or_fallback(self.try_ganzhi(time), GanzhiInfo::fallback(), "ganzhi")
    }

    /// The solar term, or `None` when it cannot be derived.
    fn solar_term(&self, time: DateTime<FixedOffset>) -> Option<SolarTermInfo> {
        match self.try_solar_term(time) {
            Ok(term) => Some(term),
            Err(reason) => {
                tracing::warn!(%reason, "solar term failed, omitting it");
                None
            }
        }
    }

    /// `农历甲辰年正月初一`, or a fixed failure label.
    fn lunar_date_label(&self, time: DateTime<FixedOffset>) -> Derived<String, CalendarError> {
        Derived::or_fallback(
            self.try_lunar_date(time).map(|date| date.to_string()),
            LUNAR_DATE_FAILED.to_string(),
            "lunar date",
        )
    }

    /// Every calendar field at once.
    fn try_calendar_info(&self, time: DateTime<FixedOffset>) -> Result<ChineseCalendarInfo> {
        Ok(ChineseCalendarInfo {
            solar_date: format_solar_date(time.date_naive()),
            lunar_date: self.try_lunar_date(time)?.to_string(),
            solar_term: Some(self.try_solar_term(time)?),
            ganzhi: self.try_ganzhi(time)?,
        })
    }

    /// The info panel bundle. On failure the solar date is kept, the lunar
    /// date reads 农历信息获取失败, the term is omitted and the pillars fall
    /// back on their own.
    fn calendar_info(&self, time: DateTime<FixedOffset>) -> Derived<ChineseCalendarInfo, CalendarError> {
        match self.try_calendar_info(time) {
            Ok(info) => Derived::Computed(info),
            Err(reason) => {
                tracing::warn!(%reason, "calendar info failed, using fallback");
                Derived::Fallback {
                    value: ChineseCalendarInfo {
                        solar_date: format_solar_date(time.date_naive()),
                        lunar_date: CALENDAR_INFO_FAILED.to_string(),
                        solar_term: None,
                        ganzhi: self.ganzhi(time).into_value(),
                    },
                    reason,
                }
            }
        }
    }
}

/// The calendar model chosen at construction time.
#[derive(Debug, Clone)]
pub enum CalendarStrategy<E = AnalyticEphemeris> {
    Astronomical(AstronomicalCalendar<E>),
    Approximate(ApproximateCalendar),
}

impl CalendarStrategy {
    /// The strategy for a configured model, using the in-tree ephemeris.
    pub fn from_kind(kind: CalendarModelKind) -> Self {
        match kind {
            CalendarModelKind::Astronomical => {
                CalendarStrategy::Astronomical(AstronomicalCalendar::default())
            }
            CalendarModelKind::Approximate => CalendarStrategy::Approximate(ApproximateCalendar),
        }
    }
}

impl Default for CalendarStrategy {
    fn default() -> Self {
        Self::from_kind(CalendarModelKind::default())
    }
}

impl<E: Ephemeris> CalendarModel for CalendarStrategy<E> {
    fn kind(&self) -> CalendarModelKind {
        match self {
            CalendarStrategy::Astronomical(model) => model.kind(),
            CalendarStrategy::Approximate(model) => model.kind(),
        }
    }

    fn try_ganzhi(&self, time: DateTime<FixedOffset>) -> Result<GanzhiInfo> {
        match self {
            CalendarStrategy::Astronomical(model) => model.try_ganzhi(time),
            CalendarStrategy::Approximate(model) => model.try_ganzhi(time),
        }
    }

    fn try_solar_term(&self, time: DateTime<FixedOffset>) -> Result<SolarTermInfo> {
        match self {
            CalendarStrategy::Astronomical(model) => model.try_solar_term(time),
            CalendarStrategy::Approximate(model) => model.try_solar_term(time),
        }
    }

    fn try_lunar_date(&self, time: DateTime<FixedOffset>) -> Result<LunarDate> {
        match self {
            CalendarStrategy::Astronomical(model) => model.try_lunar_date(time),
            CalendarStrategy::Approximate(model) => model.try_lunar_date(time),
        }
    }
}
