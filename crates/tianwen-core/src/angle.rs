//! Angle helpers.

/// Degrees in one full turn.
pub const DEGREES_PER_TURN: f64 = 360.0;

/// Reduce an angle in degrees to `[0, 360)`.
///
/// Non-finite input is returned unchanged so callers can detect it.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let reduced = degrees.rem_euclid(DEGREES_PER_TURN);
    // rem_euclid can round tiny negative inputs up to exactly 360
    if reduced >= DEGREES_PER_TURN {
        0.0
    } else {
        reduced
    }
}
