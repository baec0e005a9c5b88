//! Gravity timing gate.
//!
//! Decides once per tick whether the automatic fall step is due. The caller
//! supplies `now`, which keeps the gate deterministic under test.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityTimer {
    interval: Duration,
    last_step: Instant,
}

impl GravityTimer {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_step: now,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn last_step(&self) -> Instant {
        self.last_step
    }

    /// Returns true (and restarts the interval at `now`) once at least one
    /// full interval has elapsed since the last step.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_step) >= self.interval {
            self.last_step = now;
            return true;
        }
        false
    }

    /// Time left until the next step is due.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.interval
            .saturating_sub(now.saturating_duration_since(self.last_step))
    }

    pub fn reset(&mut self, now: Instant) {
        self.last_step = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_fires_once_per_interval() {
        let start = Instant::now();
        let mut gate = GravityTimer::new(Duration::from_millis(1000), start);

        assert!(!gate.poll(start));
        assert!(!gate.poll(start + Duration::from_millis(500)));
        assert!(!gate.poll(start + Duration::from_millis(999)));
        assert!(gate.poll(start + Duration::from_millis(1000)));
        // The interval restarts at the firing instant, not at the deadline.
        assert!(!gate.poll(start + Duration::from_millis(1999)));
        assert!(gate.poll(start + Duration::from_millis(2000)));
    }

    #[test]
    fn test_late_poll_fires_only_once() {
        let start = Instant::now();
        let mut gate = GravityTimer::new(Duration::from_millis(100), start);

        let late = start + Duration::from_millis(450);
        assert!(gate.poll(late));
        assert!(!gate.poll(late));
        assert_eq!(gate.last_step(), late);
    }

    #[test]
    fn test_remaining() {
        let start = Instant::now();
        let gate = GravityTimer::new(Duration::from_millis(1000), start);

        assert_eq!(gate.remaining(start), Duration::from_millis(1000));
        assert_eq!(
            gate.remaining(start + Duration::from_millis(250)),
            Duration::from_millis(750)
        );
        assert_eq!(gate.remaining(start + Duration::from_secs(5)), Duration::ZERO);
    }

    #[test]
    fn test_clock_going_backwards_does_not_fire() {
        let start = Instant::now() + Duration::from_secs(10);
        let mut gate = GravityTimer::new(Duration::from_millis(100), start);
        assert!(!gate.poll(start - Duration::from_secs(5)));
    }
}
