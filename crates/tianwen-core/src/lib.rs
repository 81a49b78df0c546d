//! Core types shared by the tianwen crates.
//!
//! Holds the vocabulary every other crate speaks: celestial bodies, observer
//! locations, angle normalization, the injectable clock, the cooperative
//! interval timer and the [`Derived`] outcome used for fallback values.

mod angle;
mod body;
mod clock;
mod derived;
mod observer;
mod settings;
mod timer;

pub use angle::{DEGREES_PER_TURN, normalize_degrees};
pub use body::{Body, Luminary};
pub use clock::{Clock, ManualClock, SystemClock};
pub use derived::Derived;
pub use observer::{Observer, ObserverPreset};
pub use settings::{AngleModelKind, AnimationSpeed, CalendarModelKind, ColorTheme, OscillatorMode};
pub use timer::IntervalTimer;
