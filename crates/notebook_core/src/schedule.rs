//! Time-driven scheduling primitives.
//!
//! Both primitives are driven by explicit instants supplied by the caller, so they
//! never read a clock themselves and behave identically under test.
use std::time::{Duration, Instant};

/// Coalesces bursts of triggers: only the last value survives, and it becomes due
/// once `wait` has elapsed without a newer trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer<T> {
    wait: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending<T> {
    due: Instant,
    value: T,
}

impl<T> Debouncer<T> {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    /// Replaces any pending value and restarts the quiet period. Returns the new deadline.
    pub fn trigger(&mut self, now: Instant, value: T) -> Instant {
        let due = now + self.wait;
        self.pending = Some(Pending { due, value });
        due
    }

    /// Takes the pending value if its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.due => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Takes the pending value immediately, regardless of its deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Admits the leading event of each interval and drops the rest of that interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Throttler {
    interval: Duration,
    last_admitted: Option<Instant>,
}

impl Throttler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_admitted: None,
        }
    }

    pub fn admit(&mut self, now: Instant) -> bool {
        let open = self
            .last_admitted
            .map_or(true, |last| now.saturating_duration_since(last) >= self.interval);
        if open {
            self.last_admitted = Some(now);
        }
        open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn debouncer_keeps_only_the_last_trigger() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(ms(500));
        for (i, offset) in [0, 100, 200, 300].into_iter().enumerate() {
            debouncer.trigger(t0 + ms(offset), i);
        }

        assert_eq!(debouncer.poll(t0 + ms(799)), None);
        assert_eq!(debouncer.poll(t0 + ms(800)), Some(3));
        assert_eq!(debouncer.poll(t0 + ms(5000)), None);
    }

    #[test]
    fn debouncer_flush_ignores_deadline() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(ms(1000));
        debouncer.trigger(t0, "edit");
        assert_eq!(debouncer.deadline(), Some(t0 + ms(1000)));
        assert_eq!(debouncer.flush(), Some("edit"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn throttler_admits_leading_event_per_window() {
        let t0 = Instant::now();
        let mut throttler = Throttler::new(ms(500));
        let admitted: Vec<bool> = [0, 50, 100, 499, 500, 700, 1000]
            .into_iter()
            .map(|offset| throttler.admit(t0 + ms(offset)))
            .collect();

        assert_eq!(admitted, vec![true, false, false, false, true, false, true]);
    }
}
