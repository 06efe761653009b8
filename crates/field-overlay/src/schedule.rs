//! Scheduling primitives: the per-frame scheduler seam and the trailing-edge
//! debouncer for viewport events.
//!
//! The host maps `FrameScheduler` onto its display-refresh callback;
//! `ManualScheduler` is the deterministic implementation used by tests and
//! the snapshot tool. The debouncer takes explicit `Instant`s so tests
//! drive it with a fake clock.

use std::time::{Duration, Instant};

/// Handle to one outstanding frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleToken(u64);

/// The per-frame scheduling seam.
///
/// `schedule` requests one callback at the next frame and returns a token;
/// `cancel` revokes a request that has not fired yet. Callers hold at most
/// one token at a time, which is what makes `start()` idempotent.
pub trait FrameScheduler {
    fn schedule(&mut self) -> ScheduleToken;
    fn cancel(&mut self, token: ScheduleToken);
}

/// Deterministic scheduler: frames fire only when the test or tool pumps
/// them explicitly.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Option<u64>,
    scheduled_count: u64,
    cancelled_count: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when a frame request is outstanding.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consume the outstanding request, if any. Returns whether a frame
    /// should fire; the caller then invokes the overlay's frame handler.
    pub fn pump(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn scheduled_count(&self) -> u64 {
        self.scheduled_count
    }

    pub fn cancelled_count(&self) -> u64 {
        self.cancelled_count
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule(&mut self) -> ScheduleToken {
        self.next_id += 1;
        self.scheduled_count += 1;
        self.pending = Some(self.next_id);
        ScheduleToken(self.next_id)
    }

    fn cancel(&mut self, token: ScheduleToken) {
        if self.pending == Some(token.0) {
            self.pending = None;
            self.cancelled_count += 1;
        }
    }
}

/// Trailing-edge debouncer over explicit instants.
///
/// Every `trigger` resets the deadline to `now + window`; `fire` reports
/// true once the deadline passes and clears it, so N events inside one
/// window produce exactly one firing.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Record an event at `now`, resetting the deadline.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// Check the deadline at `now`. Returns true at most once per window:
    /// the deadline is cleared when it fires.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any outstanding deadline without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(100);

    #[test]
    fn test_manual_scheduler_single_outstanding_token() {
        let mut sched = ManualScheduler::new();
        assert!(!sched.has_pending());

        let token = sched.schedule();
        assert!(sched.has_pending());

        sched.cancel(token);
        assert!(!sched.has_pending());
        assert!(!sched.pump());
    }

    #[test]
    fn test_manual_scheduler_stale_cancel_is_ignored() {
        let mut sched = ManualScheduler::new();
        let old = sched.schedule();
        assert!(sched.pump());

        // The frame already fired; cancelling its token must not disturb a
        // newly scheduled one.
        let _fresh = sched.schedule();
        sched.cancel(old);
        assert!(sched.has_pending());
    }

    #[test]
    fn test_debounce_coalesces_burst_into_one_firing() {
        let mut debounce = Debouncer::new(WINDOW);
        let t0 = Instant::now();

        // Five events 10 ms apart, all inside the rolling window.
        for i in 0..5 {
            debounce.trigger(t0 + Duration::from_millis(i * 10));
        }
        // Before the final deadline: nothing fires.
        assert!(!debounce.fire(t0 + Duration::from_millis(120)));
        // After it: exactly one firing.
        assert!(debounce.fire(t0 + Duration::from_millis(141)));
        assert!(!debounce.fire(t0 + Duration::from_millis(500)));
    }

    #[test]
    fn test_spaced_events_each_fire() {
        let mut debounce = Debouncer::new(WINDOW);
        let t0 = Instant::now();
        let mut fired = 0;

        for i in 0..3 {
            let at = t0 + Duration::from_millis(i * 300);
            debounce.trigger(at);
            if debounce.fire(at + Duration::from_millis(150)) {
                fired += 1;
            }
        }
        assert_eq!(fired, 3);
    }

    #[test]
    fn test_cancel_clears_deadline() {
        let mut debounce = Debouncer::new(WINDOW);
        let t0 = Instant::now();
        debounce.trigger(t0);
        debounce.cancel();
        assert!(!debounce.fire(t0 + Duration::from_secs(1)));
    }
}
