//! Wall-clock abstraction.

use chrono::{DateTime, Utc};

/// Source of the current time.
///
/// The countdown only ever asks "what time is it now", so tests can substitute
/// a hand-stepped clock and walk the window edge second by second.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(any(test, feature = "testutils"))]
pub use manual::ManualClock;

#[cfg(any(test, feature = "testutils"))]
mod manual {
    use std::sync::Mutex;

    use chrono::{DateTime, Duration, Utc};

    use super::Clock;

    /// Hand-stepped clock for deterministic countdown tests.
    pub struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        pub fn starting_at(now: DateTime<Utc>) -> Self {
            ManualClock {
                now: Mutex::new(now),
            }
        }

        pub fn advance(&self, by: Duration) {
            let mut now = self.now.lock().expect("clock poisoned");
            *now = *now + by;
        }

        pub fn set(&self, to: DateTime<Utc>) {
            *self.now.lock().expect("clock poisoned") = to;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().expect("clock poisoned")
        }
    }
}
