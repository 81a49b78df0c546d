//! Animation registry for the tianwen dashboard.
//!
//! A single registry owns every oscillating value on screen. The host loop
//! calls [`tick_shared`] once per frame; each enabled entry is advanced
//! according to its [`AnimationKind`] and its observer, if any, is told the
//! new value.

mod handle;
mod kind;
mod registry;

pub use handle::{AnimationHandle, SharedRegistry, tick_shared, use_animation};
pub use kind::AnimationKind;
pub use registry::{AnimationConfig, AnimationRegistry, AnimationSnapshot, UpdateFn};
pub use tianwen_core::OscillatorMode;
