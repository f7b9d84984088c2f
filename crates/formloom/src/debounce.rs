//! Quiet-period gating for value-change notifications.
//!
//! The debouncer is a deterministic state machine driven by caller-supplied
//! [`Instant`]s rather than runtime timers, so a burst of changes inside the
//! quiet window collapses to one emission and behavior stays testable. An
//! emission equal to the previously emitted snapshot is suppressed
//! (distinct-until-changed).

use std::time::{Duration, Instant};

use serde_json::Value;

/// Quiet period applied to value-change notifications.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(350);

/// Collapses bursts of value-change notifications and deduplicates
/// consecutive identical snapshots.
#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    pending: Option<(Instant, Value)>,
    last_emitted: Option<Value>,
}

impl Debouncer {
    /// Creates a debouncer with the given quiet period.
    #[must_use]
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
            last_emitted: None,
        }
    }

    /// Records a value snapshot and restarts the quiet window.
    pub fn note(&mut self, value: Value, now: Instant) {
        self.pending = Some((now, value));
    }

    /// Emits the pending snapshot once the quiet window has elapsed.
    ///
    /// Returns `None` while the window is still open, when nothing is
    /// pending, or when the pending snapshot equals the previously emitted
    /// one.
    pub fn poll(&mut self, now: Instant) -> Option<Value> {
        let (noted_at, _) = self.pending.as_ref()?;
        if now.saturating_duration_since(*noted_at) < self.quiet {
            return None;
        }
        let (_, value) = self.pending.take()?;
        if self.last_emitted.as_ref() == Some(&value) {
            return None;
        }
        self.last_emitted = Some(value.clone());
        Some(value)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}
