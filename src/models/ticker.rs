//! Once-per-second tick source for the session countdown.
use std::time::{Duration, Instant};

/// Turns a monotonic clock into session ticks.
///
/// `poll` reports at most one tick per call. If polling stalls (the window
/// was hidden, the machine slept) the missed seconds are dropped instead of
/// being delivered in a burst.
pub struct Ticker {
    interval: Duration,
    next_due: Instant,
}

impl Ticker {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
        }
    }

    pub fn every_second(now: Instant) -> Self {
        Self::new(Duration::from_secs(1), now)
    }

    /// Returns true when a tick is due at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }

        self.next_due += self.interval;
        if self.next_due <= now {
            // Fell behind by more than one interval; resync.
            self.next_due = now + self.interval;
        }
        true
    }

    /// Time left until the next tick, for scheduling a repaint.
    pub fn until_next(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_tick_before_interval() {
        let start = Instant::now();
        let mut ticker = Ticker::every_second(start);

        assert!(!ticker.poll(start));
        assert!(!ticker.poll(start + Duration::from_millis(999)));
    }

    #[test]
    fn test_one_tick_per_interval() {
        let start = Instant::now();
        let mut ticker = Ticker::every_second(start);

        assert!(ticker.poll(start + Duration::from_millis(1000)));
        assert!(!ticker.poll(start + Duration::from_millis(1500)));
        assert!(ticker.poll(start + Duration::from_millis(2000)));
    }

    #[test]
    fn test_stall_yields_single_tick() {
        let start = Instant::now();
        let mut ticker = Ticker::every_second(start);
        let later = start + Duration::from_secs(30);

        assert!(ticker.poll(later));
        assert!(!ticker.poll(later));
        assert_eq!(ticker.until_next(later), Duration::from_secs(1));
    }
}
