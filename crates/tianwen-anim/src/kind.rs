//! Per-kind update formulas.

use std::f64::consts::TAU;

use tianwen_core::{OscillatorMode, normalize_degrees};

/// Degrees per second of a rotation at speed 1, normalized to 60 frames.
const ROTATION_DEGREES_PER_SECOND: f64 = 60.0;

/// What an animation value represents and how it evolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    /// Angle in degrees, wrapped to `[0, 360)`.
    Rotation,
    /// Unbounded accumulator of `speed * seconds`.
    Orbital,
    /// Brightness in `[0, 1]` following a sine.
    Twinkle,
    /// Brightness in `[0, 1]` following a cosine.
    Pulse,
}

impl AnimationKind {
    /// Compute the next value.
    ///
    /// `phase` is only used by [`OscillatorMode::TimeDriven`] oscillators and
    /// is advanced in place.
    pub(crate) fn advance(
        self,
        value: f64,
        phase: &mut f64,
        speed: f64,
        delta_seconds: f64,
        mode: OscillatorMode,
    ) -> f64 {
        match self {
            AnimationKind::Rotation => {
                normalize_degrees(value + speed * delta_seconds * ROTATION_DEGREES_PER_SECOND)
            }
            AnimationKind::Orbital => value + speed * delta_seconds,
            AnimationKind::Twinkle => match mode {
                OscillatorMode::Recurrence => ((value * speed).sin() + 1.0) / 2.0,
                OscillatorMode::TimeDriven => {
                    *phase = (*phase + speed * delta_seconds * TAU) % TAU;
                    (phase.sin() + 1.0) / 2.0
                }
            },
            AnimationKind::Pulse => match mode {
                OscillatorMode::Recurrence => ((value * speed).cos() + 1.0) / 2.0,
                OscillatorMode::TimeDriven => {
                    *phase = (*phase + speed * delta_seconds * TAU) % TAU;
                    (phase.cos() + 1.0) / 2.0
                }
            },
        }
    }
}
