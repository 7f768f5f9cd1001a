//! Countdown state machine for a patient's access code.

use chrono::{DateTime, Duration, Utc};

/// Access codes are valid for 30 minutes.
pub const DEFAULT_CODE_TTL_SECS: i64 = 30 * 60;

/// What a one-second tick observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// No active code; nothing to count down.
    Idle,
    /// Code still valid.
    Running { remaining: Duration },
    /// The window closed. `refresh` is true exactly once per expiry and asks
    /// the caller to re-fetch the authoritative record.
    Expired { refresh: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Running,
    Expired,
}

/// Client-side countdown for a patient's access code.
///
/// The tracker never decides expiry for the contract. It stops the local
/// display when the window closes and asks for one confirming re-fetch; the
/// fetched record outranks the local timer either way.
#[derive(Clone, Debug)]
pub struct CodeTracker {
    ttl: Duration,
    code: u64,
    issued_at: Option<DateTime<Utc>>,
    phase: Phase,
}

impl CodeTracker {
    pub fn new(ttl: Duration) -> Self {
        CodeTracker {
            ttl,
            code: 0,
            issued_at: None,
            phase: Phase::Idle,
        }
    }

    pub fn with_default_ttl() -> Self {
        CodeTracker::new(Duration::seconds(DEFAULT_CODE_TTL_SECS))
    }

    /// Feeds a fetched code value into the tracker.
    ///
    /// A nonzero code that differs from the tracked one — the first
    /// observation, or a regenerate that settled elsewhere — opens a fresh
    /// window at `now` and returns `true`. A zero code clears the countdown
    /// immediately. Re-observing the code already being tracked changes
    /// nothing: in particular it does not stretch the window.
    pub fn observe(&mut self, code: u64, now: DateTime<Utc>) -> bool {
        if code == 0 {
            self.clear();
            return false;
        }
        if code != self.code {
            self.code = code;
            self.issued_at = Some(now);
            self.phase = Phase::Running;
            return true;
        }
        false
    }

    /// Opens a fresh window unconditionally; used right after the patient's
    /// own generate action settles, where `now` is the generation time.
    pub fn restart(&mut self, code: u64, now: DateTime<Utc>) {
        if code == 0 {
            self.clear();
            return;
        }
        self.code = code;
        self.issued_at = Some(now);
        self.phase = Phase::Running;
    }

    /// Clears the countdown; used on explicit cancellation.
    pub fn cancel(&mut self) {
        self.clear();
    }

    fn clear(&mut self) {
        self.code = 0;
        self.issued_at = None;
        self.phase = Phase::Idle;
    }

    /// The code being tracked, if any.
    pub fn code(&self) -> Option<u64> {
        (self.code != 0).then_some(self.code)
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn is_expired(&self) -> bool {
        self.phase == Phase::Expired
    }

    /// Remaining validity at `now`, clamped to zero. `None` while idle.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        let issued_at = self.issued_at?;
        let left = self.ttl - (now - issued_at);
        Some(left.max(Duration::zero()))
    }

    /// Advances the countdown one step.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Tick {
        match self.phase {
            Phase::Idle => Tick::Idle,
            Phase::Running => {
                let remaining = self.remaining(now).unwrap_or_else(Duration::zero);
                if remaining > Duration::zero() {
                    Tick::Running { remaining }
                } else {
                    self.phase = Phase::Expired;
                    Tick::Expired { refresh: true }
                }
            }
            Phase::Expired => Tick::Expired { refresh: false },
        }
    }
}

/// Formats remaining time the way the dashboards render it: `MM:SS`, or
/// `--:--` when there is nothing to count.
pub fn format_remaining(remaining: Option<Duration>) -> String {
    match remaining {
        None => "--:--".to_string(),
        Some(left) => {
            let secs = left.num_seconds().max(0);
            format!("{:02}:{:02}", secs / 60, secs % 60)
        }
    }
}
