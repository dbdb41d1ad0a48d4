// Fixed-period refresh scheduling

use std::time::{Duration, Instant};

/// Period between automatic refreshes. Not configurable at runtime.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Decides when the next periodic refresh is due.
#[derive(Clone, Debug)]
pub struct Poller {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Poller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Arm the poller; the first tick is one period after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    /// Returns true at most once per period. The next deadline counts from `now`,
    /// so missed periods never fire in a burst.
    pub fn due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(deadline) if now >= deadline => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Time left before the next tick, zero when overdue.
    pub fn until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

impl Default for Poller {
    fn default() -> Self {
        Self::new(REFRESH_INTERVAL)
    }
}
