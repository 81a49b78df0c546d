//! Time sources.
//!
//! Everything that schedules work reads time through [`Clock`], so the
//! dashboard runs on [`SystemClock`] while tests drive a [`ManualClock`].

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use chrono::{DateTime, FixedOffset, Local, TimeDelta};

/// A source of monotonic and wall-clock time.
pub trait Clock {
    /// Monotonic time used for frame deltas and interval scheduling.
    fn now(&self) -> Instant;

    /// Wall-clock time, in the local offset, used for astronomy.
    fn wall(&self) -> DateTime<FixedOffset>;
}

/// The host's real clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying time, so a test can keep one handle and
/// give another to the component under test.
#[derive(Debug, Clone)]
pub struct ManualClock {
    state: Rc<Cell<(Instant, DateTime<FixedOffset>)>>,
}

impl ManualClock {
    /// Create a clock frozen at the given wall time.
    pub fn new(wall: DateTime<FixedOffset>) -> Self {
        Self {
            state: Rc::new(Cell::new((Instant::now(), wall))),
        }
    }

    /// Move both monotonic and wall time forward.
    pub fn advance(&self, by: Duration) {
        let (instant, wall) = self.state.get();
        let delta = TimeDelta::from_std(by).unwrap_or(TimeDelta::zero());
        self.state.set((instant + by, wall + delta));
    }

    /// Jump the wall clock without moving monotonic time.
    pub fn set_wall(&self, wall: DateTime<FixedOffset>) {
        let (instant, _) = self.state.get();
        self.state.set((instant, wall));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.state.get().0
    }

    fn wall(&self) -> DateTime<FixedOffset> {
        self.state.get().1
    }
}
