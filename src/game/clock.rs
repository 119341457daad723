//! Day Clock
//!
//! Fixed-interval countdown that bounds each day. The clock only counts
//! while running; reaching zero reports expiry once and halts it until
//! the next `reset`.

use serde::{Serialize, Deserialize};

/// Outcome of a single clock tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockTick {
    /// Clock is stopped; nothing happened
    Halted,
    /// Countdown advanced
    Ticked { remaining_ms: u32 },
    /// Countdown reached zero on this tick
    Expired,
}

/// Day countdown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayClock {
    duration_ms: u32,
    tick_ms: u32,
    remaining_ms: u32,
    running: bool,
    expired: bool,
}

impl DayClock {
    /// Create a stopped clock with a full countdown.
    pub fn new(duration_ms: u32, tick_ms: u32) -> Self {
        Self {
            duration_ms,
            tick_ms,
            remaining_ms: duration_ms,
            running: false,
            expired: false,
        }
    }

    /// Refill the countdown and clear expiry. Leaves the clock stopped.
    pub fn reset(&mut self) {
        self.remaining_ms = self.duration_ms;
        self.running = false;
        self.expired = false;
    }

    /// Start counting. Returns false if already running or expired.
    pub fn start(&mut self) -> bool {
        if self.running || self.expired {
            return false;
        }
        self.running = true;
        true
    }

    /// Stop counting. Returns false if already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        true
    }

    /// Advance by one tick.
    pub fn tick(&mut self) -> ClockTick {
        if !self.running {
            return ClockTick::Halted;
        }

        self.remaining_ms = self.remaining_ms.saturating_sub(self.tick_ms);

        if self.remaining_ms == 0 {
            self.running = false;
            self.expired = true;
            return ClockTick::Expired;
        }

        ClockTick::Ticked { remaining_ms: self.remaining_ms }
    }

    /// Subtract a time penalty, saturating at zero.
    ///
    /// Expiry is still reported by the next `tick`.
    pub fn penalize(&mut self, penalty_ms: u32) -> u32 {
        self.remaining_ms = self.remaining_ms.saturating_sub(penalty_ms);
        self.remaining_ms
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn tick_ms(&self) -> u32 {
        self.tick_ms
    }

    /// Milliseconds elapsed since the day started.
    pub fn elapsed_ms(&self) -> u32 {
        self.duration_ms - self.remaining_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Remaining fraction of the day, for the progress bar.
    pub fn ratio(&self) -> f32 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        self.remaining_ms as f32 / self.duration_ms as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_stop_idempotent() {
        let mut clock = DayClock::new(60_000, 100);
        assert!(clock.start());
        assert!(!clock.start());
        assert!(clock.stop());
        assert!(!clock.stop());
    }

    #[test]
    fn test_halted_tick_is_noop() {
        let mut clock = DayClock::new(60_000, 100);
        assert_eq!(clock.tick(), ClockTick::Halted);
        assert_eq!(clock.remaining_ms(), 60_000);
    }

    #[test]
    fn test_expires_exactly_once() {
        let mut clock = DayClock::new(60_000, 100);
        clock.start();

        let mut expirations = 0;
        for _ in 0..650 {
            if clock.tick() == ClockTick::Expired {
                expirations += 1;
            }
        }

        assert_eq!(expirations, 1);
        assert_eq!(clock.remaining_ms(), 0);
        assert!(!clock.is_running());
        assert!(!clock.start(), "expired clock must be reset first");
    }

    #[test]
    fn test_penalty_saturates_then_expires_on_tick() {
        let mut clock = DayClock::new(3_000, 100);
        clock.start();

        assert_eq!(clock.penalize(5_000), 0);
        assert!(clock.is_running());
        assert_eq!(clock.tick(), ClockTick::Expired);
    }

    #[test]
    fn test_reset_and_ratio() {
        let mut clock = DayClock::new(1_000, 100);
        clock.start();
        for _ in 0..5 {
            clock.tick();
        }
        assert!((clock.ratio() - 0.5).abs() < f32::EPSILON);
        assert_eq!(clock.elapsed_ms(), 500);

        clock.reset();
        assert_eq!(clock.remaining_ms(), 1_000);
        assert!(!clock.is_running());
    }
}
