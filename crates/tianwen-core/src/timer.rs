//! Cooperative interval timer.

use std::time::{Duration, Instant};

/// A repeating deadline polled by the host loop.
///
/// The timer never runs anything by itself; the owner asks [`poll`] on each
/// loop iteration and does its work when the timer reports it is due.
///
/// [`poll`]: IntervalTimer::poll
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl IntervalTimer {
    /// Create a stopped timer.
    ///
    /// A zero interval is raised to one millisecond.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    /// The configured period.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Arm the timer. Returns `false` when it was already running, in which
    /// case the existing schedule is kept.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.next_due.is_some() {
            return false;
        }
        self.next_due = Some(now + self.interval);
        true
    }

    /// Disarm the timer. Returns `false` when it was not running.
    pub fn stop(&mut self) -> bool {
        self.next_due.take().is_some()
    }

    /// Whether the timer is armed.
    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Report whether a deadline passed since the last poll.
    ///
    /// Missed periods are coalesced into a single firing.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }
        // next deadline on the original grid, strictly after `now`
        let period = self.interval.as_nanos();
        let into_period = (now - due).as_nanos() % period;
        let into_period = Duration::from_nanos(u64::try_from(into_period).unwrap_or(u64::MAX));
        self.next_due = Some(now + self.interval.saturating_sub(into_period));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_timer_never_fires() {
        let mut timer = IntervalTimer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        assert!(!timer.poll(t0 + Duration::from_secs(10)));
    }

    #[test]
    fn test_fires_once_per_interval() {
        let mut timer = IntervalTimer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        assert!(timer.start(t0));

        assert!(!timer.poll(t0 + Duration::from_millis(99)));
        assert!(timer.poll(t0 + Duration::from_millis(100)));
        assert!(!timer.poll(t0 + Duration::from_millis(150)));
        assert!(timer.poll(t0 + Duration::from_millis(200)));
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut timer = IntervalTimer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        assert!(timer.start(t0));
        assert!(!timer.start(t0 + Duration::from_millis(50)));

        // the original schedule is kept
        assert!(timer.poll(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn test_missed_periods_coalesce() {
        let mut timer = IntervalTimer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        timer.start(t0);
        assert!(timer.poll(t0 + Duration::from_millis(550)));
        assert!(!timer.poll(t0 + Duration::from_millis(599)));
        assert!(timer.poll(t0 + Duration::from_millis(600)));
    }

    #[test]
    fn test_long_gap_keeps_the_grid() {
        let mut timer = IntervalTimer::new(Duration::from_millis(1));
        let t0 = Instant::now();
        timer.start(t0);

        let later = t0 + Duration::from_secs(30 * 86_400) + Duration::from_micros(500);
        assert!(timer.poll(later));
        assert!(!timer.poll(later + Duration::from_micros(499)));
        assert!(timer.poll(later + Duration::from_micros(500)));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut timer = IntervalTimer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        timer.start(t0);
        assert!(timer.stop());
        assert!(!timer.stop());
        assert!(!timer.poll(t0 + Duration::from_secs(1)));
    }
}
