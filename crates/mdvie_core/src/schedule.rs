//! Cooperative periodic timers polled from a UI loop.

use std::time::{Duration, Instant};

/// Fixed-period timer with explicit start/stop.
///
/// The owner polls it once per frame; nothing runs in the background. Missed
/// periods are coalesced into a single firing so a stalled loop does not
/// produce a burst of ticks afterwards.
#[derive(Debug, Clone)]
pub struct PeriodicTimer {
    period: Duration,
    next_due: Option<Instant>,
}

impl PeriodicTimer {
    /// Stopped timer with the given period.
    ///
    /// A zero period is bumped to one millisecond.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            next_due: None,
        }
    }

    /// Timer already armed to fire one period after `now`.
    pub fn started(period: Duration, now: Instant) -> Self {
        let mut timer = Self::new(period);
        timer.start(now);
        timer
    }

    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Next firing time, if running.
    pub fn deadline(&self) -> Option<Instant> {
        self.next_due
    }

    /// Time left until the next firing, zero when overdue.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.next_due
            .map(|due| due.saturating_duration_since(now))
    }

    /// Report whether the timer fired at `now`, re-arming it if so.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }
        let mut next = due + self.period;
        if next <= now {
            let behind = now.duration_since(due).as_nanos() / self.period.as_nanos();
            let skip = u32::try_from(behind).unwrap_or(u32::MAX);
            next = due + self.period.saturating_mul(skip.saturating_add(1));
        }
        self.next_due = Some(next);
        true
    }
}
