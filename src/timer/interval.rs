use std::time::{Duration, Instant};

/// A repeating deadline checked from the event loop's tick.
///
/// Time is passed in by the caller so the schedule can be driven in tests.
#[derive(Debug, Clone, Copy)]
pub struct IntervalTimer {
    interval: Duration,
    last_fired: Instant,
}

impl IntervalTimer {
    /// Create a timer whose first deadline is one interval after `now`
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_fired: now,
        }
    }

    /// Whether a full interval has passed since the timer last fired
    pub fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_fired) >= self.interval
    }

    /// Fire if due, starting the next interval from `now`.
    ///
    /// Missed intervals are not replayed: a long stall fires once.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.last_fired = now;
            true
        } else {
            false
        }
    }

    /// Time left until the next deadline
    pub fn remaining(&self, now: Instant) -> Duration {
        self.interval
            .saturating_sub(now.saturating_duration_since(self.last_fired))
    }
}
