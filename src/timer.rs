use std::time::{Duration, Instant};

/// A single-slot deferred task.
///
/// Scheduling overwrites whatever was pending, so at most one deadline is ever
/// outstanding and a superseded deadline can never fire. The event loop polls
/// it on every tick; nothing blocks waiting for it.
#[derive(Debug, Clone, Default)]
pub struct DeferredTask {
    due: Option<Instant>,
}

impl DeferredTask {
    pub fn new() -> Self {
        Self { due: None }
    }

    /// Schedule (or reschedule) the task for `now + delay`.
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.due = Some(now + delay);
    }

    /// Returns true exactly once, on the first poll at or past the deadline.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}
