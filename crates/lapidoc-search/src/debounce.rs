//! Cancel-and-replace debouncing with explicit time.
//!
//! The debouncer never sleeps or spawns. Callers pass `Instant`s in and poll for due work,
//! which keeps it deterministic under test and usable from any event loop.

use std::time::{Duration, Instant};

use tracing::debug;

/// Quiescence period before a scheduled query runs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// A scheduled query waiting for its deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending {
    /// Query text to run.
    query: String,
    /// When the query becomes due.
    due: Instant,
    /// Generation assigned at scheduling time.
    generation: u64,
}

/// A query whose quiescence period elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired {
    /// The final query value.
    pub query: String,
    /// Generation of the schedule call that produced it.
    pub generation: u64,
}

/// Holds at most one pending query. Scheduling replaces any previous one.
#[derive(Debug, Clone)]
pub struct Debouncer {
    /// Quiescence period.
    delay: Duration,
    /// Incremented on every schedule and cancel.
    generation: u64,
    /// The single outstanding query, if any.
    pending: Option<Pending>,
}

impl Debouncer {
    /// Creates a debouncer with the given quiescence period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    /// Returns the quiescence period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `query` to fire `delay` after `now`, superseding any pending query.
    /// Returns the new generation.
    pub fn schedule(&mut self, query: &str, now: Instant) -> u64 {
        self.generation += 1;
        if let Some(previous) = self.pending.take() {
            debug!(
                superseded = previous.generation,
                generation = self.generation,
                "debounce superseded"
            );
        }
        self.pending = Some(Pending {
            query: query.to_string(),
            due: now + self.delay,
            generation: self.generation,
        });
        self.generation
    }

    /// Drops the pending query, if any. Any generation handed out earlier is invalidated.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    /// Returns true if a query is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns when the pending query becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Returns how long until the pending query is due, zero if overdue.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.deadline().map(|due| due.saturating_duration_since(now))
    }

    /// Takes the pending query if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<Fired> {
        if self.pending.as_ref().is_none_or(|p| now < p.due) {
            return None;
        }
        let pending = self.pending.take()?;
        debug!(generation = pending.generation, "debounce fired");
        Some(Fired {
            query: pending.query,
            generation: pending.generation,
        })
    }

    /// Returns true if `generation` is the latest one handed out.
    ///
    /// Hosts that run a fired query asynchronously check this before storing results, so a
    /// superseded query cannot overwrite newer state.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
