//! Periodically refreshed dial angle.

use std::time::Duration;

use tianwen_core::{Clock, IntervalTimer, Luminary, Observer, SystemClock};

use crate::angles::AngleModel;

/// Keeps the orbit angle of one luminary up to date.
///
/// The angle is computed once on construction. After [`start`] the owner
/// calls [`poll`] from its loop and the angle is recomputed every
/// `interval`; [`stop`] freezes it.
///
/// [`start`]: AngleTracker::start
/// [`poll`]: AngleTracker::poll
/// [`stop`]: AngleTracker::stop
#[derive(Debug)]
pub struct AngleTracker<M, C = SystemClock> {
    model: M,
    clock: C,
    body: Luminary,
    base_angle: f64,
    observer: Option<Observer>,
    timer: IntervalTimer,
    current: f64,
    updates: u64,
}

impl<M: AngleModel, C: Clock> AngleTracker<M, C> {
    pub fn new(
        model: M,
        clock: C,
        body: Luminary,
        base_angle: f64,
        interval: Duration,
        observer: Option<Observer>,
    ) -> Self {
        let mut tracker = Self {
            model,
            clock,
            body,
            base_angle,
            observer,
            timer: IntervalTimer::new(interval),
            current: base_angle,
            updates: 0,
        };
        tracker.refresh();
        tracker
    }

    /// The latest computed angle.
    pub fn current_angle(&self) -> f64 {
        self.current
    }

    /// How many times the angle has been computed.
    pub fn updates(&self) -> u64 {
        self.updates
    }

    pub fn body(&self) -> Luminary {
        self.body
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Begin periodic updates. Calling it again while running does nothing.
    pub fn start(&mut self) {
        if self.timer.start(self.clock.now()) {
            tracing::debug!(body = ?self.body, interval = ?self.timer.interval(), "angle tracker started");
        }
    }

    /// Stop periodic updates. The current angle is kept.
    pub fn stop(&mut self) {
        if self.timer.stop() {
            tracing::debug!(body = ?self.body, "angle tracker stopped");
        }
    }

    /// Recompute if the interval has elapsed. Returns whether it did.
    pub fn poll(&mut self) -> bool {
        if self.timer.poll(self.clock.now()) {
            self.refresh();
            true
        } else {
            false
        }
    }

    /// Recompute now, regardless of the schedule.
    pub fn refresh(&mut self) {
        self.current = self
            .model
            .orbit_angle(
                self.base_angle,
                self.body,
                self.clock.wall(),
                self.observer.as_ref(),
            )
            .into_value();
        self.updates += 1;
    }

    /// Swap the angle model and recompute.
    pub fn set_model(&mut self, model: M) {
        self.model = model;
        self.refresh();
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use tianwen_core::ManualClock;

    use super::*;
    use crate::angles::SimplifiedAngles;

    fn tracker(interval_ms: u64) -> (AngleTracker<SimplifiedAngles, ManualClock>, ManualClock) {
        let clock = ManualClock::new(
            DateTime::parse_from_rfc3339("2024-01-01T12:00:00+08:00").unwrap(),
        );
        let tracker = AngleTracker::new(
            SimplifiedAngles,
            clock.clone(),
            Luminary::Sun,
            0.0,
            Duration::from_millis(interval_ms),
            None,
        );
        (tracker, clock)
    }

    #[test]
    fn test_computes_immediately() {
        let (tracker, _) = tracker(1000);
        assert_eq!(tracker.current_angle(), 180.0);
        assert_eq!(tracker.updates(), 1);
        assert!(!tracker.is_running());
    }

    #[test]
    fn test_no_updates_before_start() {
        let (mut tracker, clock) = tracker(1000);
        clock.advance(Duration::from_secs(3600));
        assert!(!tracker.poll());
        assert_eq!(tracker.current_angle(), 180.0);
    }

    #[test]
    fn test_updates_each_interval() {
        let (mut tracker, clock) = tracker(1000);
        tracker.start();

        clock.advance(Duration::from_millis(999));
        assert!(!tracker.poll());

        // six hours of wall time pass in a second of monotonic time
        clock.set_wall(DateTime::parse_from_rfc3339("2024-01-01T18:00:00+08:00").unwrap());
        clock.advance(Duration::from_millis(1));
        assert!(tracker.poll());
        assert!((tracker.current_angle() - 270.0).abs() < 1e-3);
        assert_eq!(tracker.updates(), 2);
    }

    #[test]
    fn test_double_start_keeps_one_schedule() {
        let (mut tracker, clock) = tracker(1000);
        tracker.start();
        clock.advance(Duration::from_millis(500));
        tracker.start();

        clock.advance(Duration::from_millis(500));
        assert!(tracker.poll());
        assert!(!tracker.poll());
        assert_eq!(tracker.updates(), 2);
    }

    #[test]
    fn test_stop_freezes_angle() {
        let (mut tracker, clock) = tracker(1000);
        tracker.start();
        tracker.stop();
        tracker.stop();

        clock.advance(Duration::from_secs(10));
        assert!(!tracker.poll());
        assert_eq!(tracker.current_angle(), 180.0);
        assert_eq!(tracker.updates(), 1);
    }

    #[test]
    fn test_base_angle_offsets() {
        let clock = ManualClock::new(
            DateTime::parse_from_rfc3339("2024-01-01T12:00:00+08:00").unwrap(),
        );
        let tracker = AngleTracker::new(
            SimplifiedAngles,
            clock,
            Luminary::Sun,
            270.0,
            Duration::from_secs(1),
            None,
        );
        assert_eq!(tracker.current_angle(), 90.0);
    }
}
