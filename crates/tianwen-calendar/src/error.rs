//! Error types for calendar derivations.

use chrono::NaiveDate;
use thiserror::Error;
use tianwen_astro::AstroError;

/// Why a calendar field could not be derived.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CalendarError {
    /// The ephemeris behind the astronomical calendar failed.
    #[error("ephemeris query failed: {0}")]
    Astro(#[from] AstroError),

    /// Stepping across days left the representable date range.
    #[error("date arithmetic overflowed near {date}")]
    DateOverflow { date: NaiveDate },

    /// The year cannot be represented as a calendar date.
    #[error("year {year} is out of range")]
    YearOutOfRange { year: i32 },
}

/// Shorthand used across the crate.
pub type Result<T> = std::result::Result<T, CalendarError>;
