use std::time::{Duration, Instant};

/// Holds the latest value until no newer one has arrived for `interval`.
#[derive(Debug)]
pub struct Debouncer<T> {
    interval: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(interval: Duration) -> Self {
        Debouncer {
            interval,
            pending: None,
        }
    }

    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.interval));
    }

    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        match self.pending.take() {
            Some((value, deadline)) if now >= deadline => Some(value),
            other => {
                self.pending = other;
                None
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}
