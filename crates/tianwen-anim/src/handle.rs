//! Scoped access to a shared registry.

use std::cell::RefCell;
use std::rc::Rc;

use tianwen_core::{Clock, SystemClock};

use crate::registry::{AnimationConfig, AnimationRegistry};

/// A registry shared between the host loop and the views that own animations.
pub type SharedRegistry<C = SystemClock> = Rc<RefCell<AnimationRegistry<C>>>;

/// Run one frame of a shared registry.
///
/// The registry is only borrowed while values advance, so update observers
/// may read other entries or drive handles of the same registry.
pub fn tick_shared<C: Clock>(registry: &SharedRegistry<C>) -> Option<f64> {
    let mut frame = registry.borrow_mut().begin_frame()?;
    frame.notify();
    let delta_seconds = frame.delta_seconds();
    registry.borrow_mut().finish_frame(frame);
    Some(delta_seconds)
}

/// Register `id` and return a handle bound to it.
///
/// The handle stops its animation when dropped. The entry stays in the
/// registry, so its last value remains readable.
pub fn use_animation<C: Clock>(
    registry: &SharedRegistry<C>,
    id: impl Into<String>,
    config: AnimationConfig,
) -> AnimationHandle<C> {
    let id = id.into();
    registry.borrow_mut().register(id.clone(), config);
    AnimationHandle {
        registry: Rc::clone(registry),
        id,
    }
}

/// Controls for one registered animation.
#[derive(Debug)]
pub struct AnimationHandle<C: Clock = SystemClock> {
    registry: SharedRegistry<C>,
    id: String,
}

impl<C: Clock> AnimationHandle<C> {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn start(&self) {
        self.registry.borrow_mut().start(&self.id);
    }

    pub fn stop(&self) {
        self.registry.borrow_mut().stop(&self.id);
    }

    pub fn set_speed(&self, speed: f64) {
        self.registry.borrow_mut().set_speed(&self.id, speed);
    }

    pub fn value(&self) -> f64 {
        self.registry.borrow().value(&self.id)
    }

    pub fn set_value(&self, value: f64) {
        self.registry.borrow_mut().set_value(&self.id, value);
    }

    pub fn reset(&self) {
        self.registry.borrow_mut().reset(&self.id);
    }
}

impl<C: Clock> Drop for AnimationHandle<C> {
    fn drop(&mut self) {
        // skipped if the registry is mid-borrow, e.g. dropped from an update callback
        if let Ok(mut registry) = self.registry.try_borrow_mut() {
            registry.stop(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::DateTime;
    use tianwen_core::{ManualClock, OscillatorMode};

    use super::*;
    use crate::AnimationKind;

    fn shared() -> (SharedRegistry<ManualClock>, ManualClock) {
        let clock = ManualClock::new(
            DateTime::parse_from_rfc3339("2024-01-01T12:00:00+08:00").unwrap(),
        );
        let registry = AnimationRegistry::new(clock.clone(), OscillatorMode::Recurrence);
        (Rc::new(RefCell::new(registry)), clock)
    }

    #[test]
    fn test_handle_drives_its_entry() {
        let (registry, clock) = shared();
        let orbit = use_animation(
            &registry,
            "orbit",
            AnimationConfig::new(AnimationKind::Orbital).speed(2.0),
        );
        orbit.start();

        clock.advance(Duration::from_secs(1));
        tick_shared(&registry);

        assert_eq!(orbit.id(), "orbit");
        assert_eq!(orbit.value(), 2.0);

        orbit.set_value(10.0);
        assert_eq!(registry.borrow().value("orbit"), 10.0);
        orbit.reset();
        assert_eq!(orbit.value(), 0.0);
    }

    #[test]
    fn test_drop_stops_but_keeps_entry() {
        let (registry, clock) = shared();
        {
            let orbit = use_animation(&registry, "orbit", AnimationConfig::new(AnimationKind::Orbital));
            orbit.start();
            clock.advance(Duration::from_secs(1));
            tick_shared(&registry);
        }

        assert!(!registry.borrow().has_active_animations());
        assert!(registry.borrow().contains("orbit"));

        clock.advance(Duration::from_secs(1));
        tick_shared(&registry);
        assert_eq!(registry.borrow().value("orbit"), 1.0);
    }

    #[test]
    fn test_set_speed_through_handle() {
        let (registry, clock) = shared();
        let spin = use_animation(&registry, "spin", AnimationConfig::new(AnimationKind::Rotation));
        spin.set_speed(0.5);
        spin.start();

        clock.advance(Duration::from_secs(1));
        tick_shared(&registry);
        assert_eq!(spin.value(), 30.0);

        spin.stop();
        assert!(!registry.borrow().has_active_animations());
    }

    #[test]
    fn test_observer_can_use_the_registry() {
        let (registry, clock) = shared();
        let other = use_animation(&registry, "other", AnimationConfig::new(AnimationKind::Orbital));
        other.set_value(7.0);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let peek = Rc::clone(&registry);
        let spin = use_animation(
            &registry,
            "spin",
            AnimationConfig::new(AnimationKind::Rotation).on_update(move |_, _| {
                sink.borrow_mut().push(peek.borrow().value("other"));
                peek.borrow_mut().start("other");
            }),
        );
        spin.start();

        clock.advance(Duration::from_millis(16));
        assert!(tick_shared(&registry).is_some());
        assert_eq!(*seen.borrow(), vec![7.0]);
        assert!(registry.borrow().animations().iter().all(|a| a.enabled));

        clock.advance(Duration::from_secs(1));
        tick_shared(&registry);
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(other.value(), 8.0);
    }
}
