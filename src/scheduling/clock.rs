use chrono::{DateTime, Utc};
use std::cell::Cell;

/// Host capability giving the current date and time.
pub trait WallClock {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for headless runs and tests.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl WallClock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}
