use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

/// Injected time source. Everything in this crate reads the clock through
/// this port so tests and headless drivers can script it.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as i64)
            .unwrap_or(0)
    }
}

/// Hand-driven clock for tests and scripted playthroughs.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<i64>,
}

impl ManualClock {
    pub fn starting_at(now_ms: i64) -> Self {
        Self {
            now: Cell::new(now_ms),
        }
    }

    pub fn advance(&self, delta_ms: i64) {
        self.now.set(self.now.get() + delta_ms);
    }

    pub fn set(&self, now_ms: i64) {
        self.now.set(now_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }
}
