//! Error types for astronomical derivations.

use thiserror::Error;
use tianwen_core::Body;

/// Why an ephemeris query could not be answered.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum AstroError {
    /// Observer coordinates are not finite or latitude is outside ±90°.
    #[error("invalid observer: latitude {latitude}, longitude {longitude}")]
    InvalidObserver { latitude: f64, longitude: f64 },

    /// The analytic series are only fitted over a limited range of years.
    #[error("year {year} is outside the supported range -1000..=3000")]
    UnsupportedEpoch { year: i32 },

    /// A computation produced NaN or infinity.
    #[error("{quantity} is not finite")]
    NonFinite { quantity: &'static str },

    /// The ephemeris has no model for this body and query.
    #[error("{body:?} is not supported by this query")]
    UnsupportedBody { body: Body },
}

/// Shorthand used across the crate.
pub type Result<T> = std::result::Result<T, AstroError>;

/// Reject NaN and infinities with a named error.
pub(crate) fn finite(value: f64, quantity: &'static str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AstroError::NonFinite { quantity })
    }
}
