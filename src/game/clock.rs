// --- Time sources & countdown timer ------------------------------------------
use std::cell::Cell;

/// Source of monotonic milliseconds. The browser adapter reads
/// `performance.now()`; tests advance a [`ManualClock`] by hand.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self { now: Cell::new(start_ms) }
    }

    pub fn advance(&self, ms: f64) -> f64 {
        let next = self.now.get() + ms;
        self.now.set(next);
        next
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Countdown tick source: reports each whole second elapsed since `start_ms`.
#[derive(Clone, Debug)]
pub struct SecondTimer {
    start_ms: f64,
    last_tick_idx: i64, // index of last processed whole second
}

impl SecondTimer {
    pub const PERIOD_MS: f64 = 1000.0;

    pub fn new(now: f64) -> Self {
        Self { start_ms: now, last_tick_idx: 0 }
    }

    /// Time at which the next whole second elapses.
    pub fn next_tick_ms(&self) -> f64 {
        self.start_ms + (self.last_tick_idx + 1) as f64 * Self::PERIOD_MS
    }

    /// Consume one tick if it is due at `now`.
    pub fn take_tick(&mut self, now: f64) -> bool {
        if now < self.next_tick_ms() {
            return false;
        }
        self.last_tick_idx += 1;
        true
    }
}
