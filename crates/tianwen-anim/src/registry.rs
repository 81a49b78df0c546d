//! Animation registry state management.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Instant;

use tianwen_core::{Clock, OscillatorMode, SystemClock};

use crate::kind::AnimationKind;

/// Observer invoked after each update with `(value, delta_seconds)`.
pub type UpdateFn = Box<dyn FnMut(f64, f64)>;

/// Settings for a newly registered animation.
pub struct AnimationConfig {
    kind: AnimationKind,
    enabled: bool,
    speed: f64,
    on_update: Option<UpdateFn>,
}

impl AnimationConfig {
    /// A disabled animation at speed 1 with no observer.
    pub fn new(kind: AnimationKind) -> Self {
        Self {
            kind,
            enabled: false,
            speed: 1.0,
            on_update: None,
        }
    }

    /// Register the entry already enabled.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Speed multiplier.
    pub fn speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Observer called after every update.
    pub fn on_update(mut self, f: impl FnMut(f64, f64) + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for AnimationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationConfig")
            .field("kind", &self.kind)
            .field("enabled", &self.enabled)
            .field("speed", &self.speed)
            .field("on_update", &self.on_update.is_some())
            .finish()
    }
}

/// A registered animation.
struct AnimationEntry {
    kind: AnimationKind,
    enabled: bool,
    speed: f64,
    value: f64,
    /// Accumulated phase for time-driven oscillators.
    phase: f64,
    start_time: Option<Instant>,
    last_update: Option<Instant>,
    on_update: Option<UpdateFn>,
    /// Bumped on every `register`, so a re-registered id never gets a stale observer back.
    generation: u64,
}

impl AnimationEntry {
    fn advance(&mut self, delta_seconds: f64, mode: OscillatorMode, now: Instant) {
        self.value = self
            .kind
            .advance(self.value, &mut self.phase, self.speed, delta_seconds, mode);
        self.last_update = Some(now);
    }
}

/// An observer lent out of its entry while a frame's callbacks run.
struct PendingUpdate {
    id: String,
    generation: u64,
    value: f64,
    on_update: UpdateFn,
}

/// One advanced frame whose observers have not run yet.
///
/// Holds no borrow of the registry, so observers may call back into it.
pub(crate) struct Frame {
    delta_seconds: f64,
    pending: Vec<PendingUpdate>,
}

impl Frame {
    pub(crate) fn delta_seconds(&self) -> f64 {
        self.delta_seconds
    }

    pub(crate) fn notify(&mut self) {
        let delta_seconds = self.delta_seconds;
        for update in &mut self.pending {
            (update.on_update)(update.value, delta_seconds);
        }
    }
}

/// Read-only copy of an entry's state.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSnapshot {
    pub id: String,
    pub kind: AnimationKind,
    pub enabled: bool,
    pub speed: f64,
    pub value: f64,
    pub start_time: Option<Instant>,
    pub last_update: Option<Instant>,
}

/// State of the shared frame loop.
#[derive(Debug, Clone, Copy)]
struct FrameLoop {
    /// Time of the previous frame.
    last_frame: Instant,
}

/// Keyed table of animations advanced by one shared frame loop.
///
/// Unknown ids are ignored by every operation: mutations do nothing and
/// [`value`](Self::value) reports `0.0`.
pub struct AnimationRegistry<C: Clock = SystemClock> {
    entries: BTreeMap<String, AnimationEntry>,
    /// Armed on the first successful `start`, cleared only by `dispose`.
    frame_loop: Option<FrameLoop>,
    /// Time of the most recent frame.
    global_time: Option<Instant>,
    mode: OscillatorMode,
    clock: C,
    next_generation: u64,
}

impl Default for AnimationRegistry<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock, OscillatorMode::default())
    }
}

impl<C: Clock> AnimationRegistry<C> {
    /// Create an empty registry.
    pub fn new(clock: C, mode: OscillatorMode) -> Self {
        Self {
            entries: BTreeMap::new(),
            frame_loop: None,
            global_time: None,
            mode,
            clock,
            next_generation: 0,
        }
    }

    /// Insert or overwrite the entry for `id`, with its value reset to zero.
    pub fn register(&mut self, id: impl Into<String>, config: AnimationConfig) {
        self.next_generation += 1;
        let entry = AnimationEntry {
            kind: config.kind,
            enabled: config.enabled,
            speed: config.speed,
            value: 0.0,
            phase: 0.0,
            start_time: None,
            last_update: None,
            on_update: config.on_update,
            generation: self.next_generation,
        };
        self.entries.insert(id.into(), entry);
    }

    /// Enable an animation and make sure the frame loop is running.
    pub fn start(&mut self, id: &str) {
        let now = self.clock.now();
        let Some(entry) = self.entries.get_mut(id) else {
            return;
        };
        entry.enabled = true;
        entry.start_time = Some(now);
        entry.last_update = Some(now);

        if self.frame_loop.is_none() {
            tracing::debug!("animation frame loop started");
            self.frame_loop = Some(FrameLoop { last_frame: now });
        }
    }

    /// Disable an animation. The entry and its value are kept.
    pub fn stop(&mut self, id: &str) {
        if let Some(entry) = self.entries.get_mut(id) {
            entry.enabled = false;
        }
    }

    /// Change an animation's speed multiplier.
    pub fn set_speed(&mut self, id: &str, speed: f64) {
        if let Some(entry) = self.entries.get_mut(id) {
            entry.speed = speed;
        }
    }

    /// Current value, or `0.0` for an unknown id.
    pub fn value(&self, id: &str) -> f64 {
        self.entries.get(id).map(|e| e.value).unwrap_or(0.0)
    }

    /// Overwrite an animation's value.
    pub fn set_value(&mut self, id: &str, value: f64) {
        if let Some(entry) = self.entries.get_mut(id) {
            entry.value = value;
        }
    }

    /// Zero an animation's value and restamp its start time.
    pub fn reset(&mut self, id: &str) {
        let now = self.clock.now();
        if let Some(entry) = self.entries.get_mut(id) {
            entry.value = 0.0;
            entry.phase = 0.0;
            entry.start_time = Some(now);
            entry.last_update = Some(now);
        }
    }

    /// Whether any animation is enabled.
    pub fn has_active_animations(&self) -> bool {
        self.entries.values().any(|e| e.enabled)
    }

    /// Whether the shared frame loop is armed.
    pub fn is_running(&self) -> bool {
        self.frame_loop.is_some()
    }

    /// Time of the most recent frame, `None` before the first one.
    pub fn global_time(&self) -> Option<Instant> {
        self.global_time
    }

    /// The oscillator mode chosen at construction.
    pub fn mode(&self) -> OscillatorMode {
        self.mode
    }

    /// Whether an entry exists for `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Snapshot of every entry, ordered by id.
    pub fn animations(&self) -> Vec<AnimationSnapshot> {
        self.entries
            .iter()
            .map(|(id, e)| AnimationSnapshot {
                id: id.clone(),
                kind: e.kind,
                enabled: e.enabled,
                speed: e.speed,
                value: e.value,
                start_time: e.start_time,
                last_update: e.last_update,
            })
            .collect()
    }

    /// Run one frame of the shared loop.
    ///
    /// Advances every enabled entry by the time since the previous frame and
    /// returns that delta in seconds. Returns `None` without touching any
    /// entry while the loop is not running.
    ///
    /// Observers run after every entry has been advanced. For a registry
    /// behind a [`SharedRegistry`](crate::SharedRegistry) use
    /// [`tick_shared`](crate::tick_shared), which releases the borrow first so
    /// observers can read or control the registry.
    pub fn tick(&mut self) -> Option<f64> {
        let mut frame = self.begin_frame()?;
        frame.notify();
        let delta_seconds = frame.delta_seconds();
        self.finish_frame(frame);
        Some(delta_seconds)
    }

    /// Advance every enabled entry and lend out the observers to call.
    pub(crate) fn begin_frame(&mut self) -> Option<Frame> {
        let frame_loop = self.frame_loop.as_mut()?;
        let now = self.clock.now();
        let delta_seconds = now.saturating_duration_since(frame_loop.last_frame).as_secs_f64();
        frame_loop.last_frame = now;
        self.global_time = Some(now);

        let mode = self.mode;
        let mut pending = Vec::new();
        for (id, entry) in self.entries.iter_mut().filter(|(_, e)| e.enabled) {
            entry.advance(delta_seconds, mode, now);
            if let Some(on_update) = entry.on_update.take() {
                pending.push(PendingUpdate {
                    id: id.clone(),
                    generation: entry.generation,
                    value: entry.value,
                    on_update,
                });
            }
        }
        Some(Frame {
            delta_seconds,
            pending,
        })
    }

    /// Hand lent observers back to entries that were neither removed nor re-registered.
    pub(crate) fn finish_frame(&mut self, frame: Frame) {
        for update in frame.pending {
            match self.entries.get_mut(&update.id) {
                Some(entry) if entry.generation == update.generation => {
                    entry.on_update = Some(update.on_update);
                }
                _ => {}
            }
        }
    }

    /// Stop the frame loop and drop every entry.
    pub fn dispose(&mut self) {
        // loop first, so no frame can observe the cleared table
        if self.frame_loop.take().is_some() {
            tracing::debug!("animation frame loop stopped");
        }
        self.entries.clear();
    }
}

impl<C: Clock> fmt::Debug for AnimationRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationRegistry")
            .field("entries", &self.entries.keys().collect::<Vec<_>>())
            .field("running", &self.frame_loop.is_some())
            .field("mode", &self.mode)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use chrono::DateTime;
    use tianwen_core::ManualClock;

    use super::*;

    fn registry() -> (AnimationRegistry<ManualClock>, ManualClock) {
        let clock = ManualClock::new(
            DateTime::parse_from_rfc3339("2024-01-01T12:00:00+08:00").unwrap(),
        );
        (
            AnimationRegistry::new(clock.clone(), OscillatorMode::Recurrence),
            clock,
        )
    }

    #[test]
    fn test_register_defaults() {
        let (mut reg, _) = registry();
        reg.register("sun", AnimationConfig::new(AnimationKind::Rotation));

        let snap = &reg.animations()[0];
        assert_eq!(snap.id, "sun");
        assert!(!snap.enabled);
        assert_eq!(snap.speed, 1.0);
        assert_eq!(snap.value, 0.0);
        assert!(snap.start_time.is_none());
        assert!(!reg.is_running());
    }

    #[test]
    fn test_register_overwrites_and_resets_value() {
        let (mut reg, _) = registry();
        reg.register("sun", AnimationConfig::new(AnimationKind::Rotation));
        reg.set_value("sun", 42.0);
        reg.register("sun", AnimationConfig::new(AnimationKind::Orbital).speed(3.0));

        assert_eq!(reg.value("sun"), 0.0);
        assert_eq!(reg.animations().len(), 1);
        assert_eq!(reg.animations()[0].kind, AnimationKind::Orbital);
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let (mut reg, _) = registry();
        assert_eq!(reg.value("nope"), 0.0);

        reg.start("nope");
        reg.stop("nope");
        reg.set_speed("nope", 2.0);
        reg.set_value("nope", 2.0);
        reg.reset("nope");

        assert!(!reg.contains("nope"));
        assert!(reg.animations().is_empty());
        assert!(!reg.is_running());
    }

    #[test]
    fn test_loop_idle_until_first_start() {
        let (mut reg, clock) = registry();
        reg.register("orbit", AnimationConfig::new(AnimationKind::Orbital).enabled(true));
        clock.advance(Duration::from_secs(1));

        assert_eq!(reg.tick(), None);
        assert_eq!(reg.value("orbit"), 0.0);
        assert!(reg.global_time().is_none());
    }

    #[test]
    fn test_start_stamps_and_arms_loop() {
        let (mut reg, clock) = registry();
        reg.register("orbit", AnimationConfig::new(AnimationKind::Orbital));
        reg.start("orbit");

        let snap = &reg.animations()[0];
        assert!(snap.enabled);
        assert_eq!(snap.start_time, Some(clock.now()));
        assert_eq!(snap.last_update, Some(clock.now()));
        assert!(reg.is_running());
        assert!(reg.has_active_animations());
    }

    #[test]
    fn test_tick_uses_elapsed_seconds() {
        let (mut reg, clock) = registry();
        reg.register("orbit", AnimationConfig::new(AnimationKind::Orbital).speed(2.0));
        reg.start("orbit");

        clock.advance(Duration::from_millis(500));
        assert_eq!(reg.tick(), Some(0.5));
        assert_eq!(reg.value("orbit"), 1.0);
        assert_eq!(reg.global_time(), Some(clock.now()));

        clock.advance(Duration::from_millis(250));
        reg.tick();
        assert_eq!(reg.value("orbit"), 1.5);
    }

    #[test]
    fn test_rotation_wraps_after_full_turn() {
        let (mut reg, clock) = registry();
        reg.register("spin", AnimationConfig::new(AnimationKind::Rotation).speed(6.0));
        reg.start("spin");
        reg.set_value("spin", 123.0);

        clock.advance(Duration::from_secs(1));
        reg.tick();

        assert_eq!(reg.value("spin"), 123.0);
    }

    #[test]
    fn test_stop_freezes_value_but_keeps_loop() {
        let (mut reg, clock) = registry();
        reg.register("orbit", AnimationConfig::new(AnimationKind::Orbital));
        reg.start("orbit");
        clock.advance(Duration::from_secs(1));
        reg.tick();
        reg.stop("orbit");

        clock.advance(Duration::from_secs(5));
        reg.tick();

        assert_eq!(reg.value("orbit"), 1.0);
        assert!(reg.contains("orbit"));
        assert!(!reg.has_active_animations());
        // the loop does not stop itself when everything is disabled
        assert!(reg.is_running());
    }

    #[test]
    fn test_disabled_entries_are_not_advanced() {
        let (mut reg, clock) = registry();
        reg.register("a", AnimationConfig::new(AnimationKind::Orbital));
        reg.register("b", AnimationConfig::new(AnimationKind::Orbital));
        reg.start("a");

        clock.advance(Duration::from_secs(2));
        reg.tick();

        assert_eq!(reg.value("a"), 2.0);
        assert_eq!(reg.value("b"), 0.0);
    }

    #[test]
    fn test_on_update_receives_value_and_delta() {
        let (mut reg, clock) = registry();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        reg.register(
            "orbit",
            AnimationConfig::new(AnimationKind::Orbital)
                .speed(4.0)
                .on_update(move |value, delta| sink.borrow_mut().push((value, delta))),
        );
        reg.start("orbit");

        clock.advance(Duration::from_millis(250));
        reg.tick();
        clock.advance(Duration::from_millis(250));
        reg.tick();

        assert_eq!(*seen.borrow(), vec![(1.0, 0.25), (2.0, 0.25)]);
    }

    #[test]
    fn test_reregistered_entry_keeps_its_own_observer() {
        let (mut reg, clock) = registry();
        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        reg.register(
            "orbit",
            AnimationConfig::new(AnimationKind::Orbital).on_update(move |_, _| *counter.borrow_mut() += 1),
        );
        reg.start("orbit");

        let mut frame = reg.begin_frame().unwrap();
        reg.register("orbit", AnimationConfig::new(AnimationKind::Orbital));
        frame.notify();
        reg.finish_frame(frame);

        reg.start("orbit");
        clock.advance(Duration::from_millis(100));
        reg.tick();
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_set_speed_applies_to_next_frame() {
        let (mut reg, clock) = registry();
        reg.register("orbit", AnimationConfig::new(AnimationKind::Orbital));
        reg.start("orbit");
        reg.set_speed("orbit", 10.0);

        clock.advance(Duration::from_millis(100));
        reg.tick();

        assert!((reg.value("orbit") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_reset_zeroes_and_restamps() {
        let (mut reg, clock) = registry();
        reg.register("orbit", AnimationConfig::new(AnimationKind::Orbital));
        reg.start("orbit");
        clock.advance(Duration::from_secs(3));
        reg.tick();

        reg.reset("orbit");

        let snap = &reg.animations()[0];
        assert_eq!(snap.value, 0.0);
        assert_eq!(snap.start_time, Some(clock.now()));
        assert!(snap.enabled);
    }

    #[test]
    fn test_dispose_stops_loop_and_clears() {
        let (mut reg, clock) = registry();
        reg.register("orbit", AnimationConfig::new(AnimationKind::Orbital));
        reg.start("orbit");
        reg.dispose();

        assert!(!reg.is_running());
        assert!(reg.animations().is_empty());
        clock.advance(Duration::from_secs(1));
        assert_eq!(reg.tick(), None);

        // usable again once re-registered
        reg.register("orbit", AnimationConfig::new(AnimationKind::Orbital));
        reg.start("orbit");
        assert!(reg.is_running());
    }

    #[test]
    fn test_second_start_does_not_double_advance() {
        let (mut reg, clock) = registry();
        reg.register("a", AnimationConfig::new(AnimationKind::Orbital));
        reg.register("b", AnimationConfig::new(AnimationKind::Orbital));
        reg.start("a");
        clock.advance(Duration::from_secs(1));
        reg.start("b");
        clock.advance(Duration::from_secs(1));

        assert_eq!(reg.tick(), Some(2.0));
        assert_eq!(reg.value("a"), 2.0);
        // b was started mid-frame but shares the loop's delta
        assert_eq!(reg.value("b"), 2.0);
    }

    #[test]
    fn test_time_driven_mode() {
        let clock = ManualClock::new(
            DateTime::parse_from_rfc3339("2024-01-01T12:00:00+08:00").unwrap(),
        );
        let mut reg = AnimationRegistry::new(clock.clone(), OscillatorMode::TimeDriven);
        reg.register("star", AnimationConfig::new(AnimationKind::Twinkle));
        reg.start("star");

        clock.advance(Duration::from_millis(250));
        reg.tick();
        assert!((reg.value("star") - 1.0).abs() < 1e-12);

        clock.advance(Duration::from_millis(500));
        reg.tick();
        assert!(reg.value("star").abs() < 1e-12);
    }
}
