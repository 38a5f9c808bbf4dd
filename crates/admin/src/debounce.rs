//! Search input debouncing, modeled as pure state transitions.
//!
//! The original console wired a timer callback to the search box; this
//! version keeps the same 300 ms window but holds the pending value and its
//! deadline as plain data. Feeding a new value supersedes the previous one
//! (latest input wins), and [`Debouncer::fire`] emits once the deadline has
//! elapsed. Callers own the clock: production code passes
//! `Instant::now()`, tests pass synthetic instants and never sleep.

use std::time::{Duration, Instant};

/// The search box debounce window.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
struct Pending {
    value: String,
    deadline: Instant,
}

/// A cancellable single-value debouncer.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    pending: Option<Pending>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl Debouncer {
    /// Create a debouncer with an explicit window.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Feed a new input value at time `now`.
    ///
    /// Any previously pending value is discarded; only the latest input
    /// ever fires.
    pub fn input(&mut self, value: impl Into<String>, now: Instant) {
        self.pending = Some(Pending {
            value: value.into(),
            deadline: now + self.window,
        });
    }

    /// Emit the pending value if its deadline has elapsed at `now`.
    ///
    /// Returns `None` while the window is still open or nothing is pending.
    /// A value fires at most once.
    pub fn fire(&mut self, now: Instant) -> Option<String> {
        if self.pending.as_ref().is_some_and(|p| now >= p.deadline) {
            return self.pending.take().map(|p| p.value);
        }
        None
    }

    /// The value waiting to fire, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.value.as_str())
    }

    /// When the pending value becomes eligible to fire.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Drop any pending value without firing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
