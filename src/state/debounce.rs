use std::time::{Duration, Instant};

/// A single re-armable deadline. Scheduling again pushes the deadline out.
#[derive(Debug, Clone)]
pub(crate) struct Debounce {
    delay: Duration,
    due: Option<Instant>,
}

impl Debounce {
    pub(crate) fn new(delay: Duration) -> Self {
        Self { delay, due: None }
    }

    pub(crate) fn schedule(&mut self, now: Instant) {
        self.due = Some(now + self.delay);
    }

    pub(crate) fn cancel(&mut self) {
        self.due = None;
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    pub(crate) fn due_at(&self) -> Option<Instant> {
        self.due
    }

    /// Disarm and return `true` if the deadline has passed.
    pub(crate) fn fire(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}
