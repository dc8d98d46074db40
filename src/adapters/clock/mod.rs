//! Clock adapters.
//!
//! `SystemClock` is the production implementation; `ManualClock` lets
//! tests step time explicitly so debounce and cooldown behavior can be
//! exercised without real timers.

use std::sync::Mutex;

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Manually advanced time source for tests.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Timestamp>,
}

impl ManualClock {
    /// Creates a clock frozen at the given instant.
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Creates a clock frozen at the given Unix second.
    pub fn at_unix_secs(secs: u64) -> Self {
        Self::new(Timestamp::from_unix_secs(secs))
    }

    /// Moves the clock forward by whole seconds.
    pub fn advance_secs(&self, secs: u64) {
        let mut now = self.now.lock().unwrap();
        *now = now.plus_secs(secs);
    }

    /// Moves the clock forward by milliseconds.
    pub fn advance_millis(&self, millis: u64) {
        let mut now = self.now.lock().unwrap();
        *now = now.plus_millis(millis);
    }

    /// Jumps the clock to an absolute instant.
    pub fn set(&self, instant: Timestamp) {
        *self.now.lock().unwrap() = instant;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().unwrap()
    }
}
