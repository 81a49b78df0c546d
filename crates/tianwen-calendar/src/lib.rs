//! Chinese calendar labels: ganzhi pillars, solar terms and lunar dates.
//!
//! [`CalendarModel`] is the boundary the dashboard talks to. Two models are
//! provided: [`AstronomicalCalendar`] derives terms and lunar months from an
//! ephemeris, [`ApproximateCalendar`] uses fixed cycle arithmetic.
//! [`CalendarStrategy`] picks one from configuration.

mod approximate;
mod astronomical;
mod cycle;
mod error;
mod info;
mod model;
mod pillars;

pub use approximate::ApproximateCalendar;
pub use astronomical::AstronomicalCalendar;
pub use cycle::{
    EARTHLY_BRANCHES, FIVE_ELEMENTS, HEAVENLY_STEMS, SOLAR_TERMS, SixtyCycle, ZODIAC_ANIMALS,
};
pub use error::{CalendarError, Result};
pub use info::{
    CALENDAR_INFO_FAILED, ChineseCalendarInfo, DayPillar, GanzhiInfo, LUNAR_DATE_FAILED, LunarDate,
    Pillar, SolarTermInfo, YearPillar, format_solar_date, solar_term_description,
};
pub use model::{CalendarModel, CalendarStrategy};
pub use pillars::{day_cycle, hour_cycle, julian_day_number, month_cycle, year_cycle};
