use chrono::{DateTime, Duration, Utc};

/// Elapsed and remaining time at one observation of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBudget {
    pub elapsed: Duration,
    pub remaining: Duration,
}

/// Fixed-limit session countdown, driven entirely by timestamps passed in
/// from the caller's event loop. There are no timers in here, which is what
/// makes whole sessions testable with a fixed clock.
///
/// Once elapsed reaches the limit, expiry latches true permanently; a later
/// observation can never un-expire the countdown.
#[derive(Debug, Clone)]
pub struct Countdown {
    limit: Duration,
    started_at: Option<DateTime<Utc>>,
    elapsed: Duration,
    expired: bool,
    stopped: bool,
}

impl Countdown {
    #[must_use]
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            started_at: None,
            elapsed: Duration::zero(),
            expired: false,
            stopped: false,
        }
    }

    /// Begin counting from `now`. Has no effect once started.
    pub fn start(&mut self, now: DateTime<Utc>) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && !self.stopped
    }

    /// Observe the countdown at `now`, updating the expiry latch.
    ///
    /// Elapsed clamps into `0..=limit`: a `now` earlier than the start (the
    /// wall clock moved backwards) reads as zero, and once the limit is
    /// reached elapsed pins there. After `stop()` the last observation is
    /// frozen and returned unchanged.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TimeBudget {
        if let Some(started_at) = self.started_at {
            if !self.stopped {
                let raw = now - started_at;
                self.elapsed = raw.clamp(Duration::zero(), self.limit);
                if self.elapsed >= self.limit {
                    self.expired = true;
                }
            }
        }
        TimeBudget {
            elapsed: self.elapsed,
            remaining: self.limit - self.elapsed,
        }
    }

    /// True once the limit has been reached. Latches.
    #[must_use]
    pub fn has_expired(&self) -> bool {
        self.expired
    }

    /// Freeze the countdown. Idempotent.
    pub fn stop(&mut self) {
        self.stopped = true;
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
