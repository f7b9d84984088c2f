//! Per-session coordinator tying the scanner, mapper, and debouncer
//! together.

use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::debug;

use crate::debounce::Debouncer;
use crate::error::Result;
use crate::scan::{self, ErrorAccumulator};
use crate::server;
use crate::tree::Group;

/// Reconciles server-side and local validation failures for one form
/// session.
///
/// Construct a fresh reconciler per form; the field tree and the
/// accumulator stay caller-owned and are borrowed per call. Dropping the
/// reconciler is the only cancellation: a caller that keeps polling a
/// torn-down form keeps scanning stale state.
#[derive(Debug, Default)]
pub struct Reconciler {
    debouncer: Debouncer,
}

impl Reconciler {
    /// Creates a reconciler with the default 350ms quiet period.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reconciler with a custom quiet period.
    #[must_use]
    pub fn with_quiet_period(quiet: Duration) -> Self {
        Self {
            debouncer: Debouncer::new(quiet),
        }
    }

    /// Records a value-change notification by snapshotting the tree's
    /// current values into the debouncer.
    pub fn note_change(&mut self, root: &Group, now: Instant) {
        self.debouncer.note(root.value_snapshot(), now);
    }

    /// Runs a scan when a debounced, deduplicated change has settled and the
    /// form is currently invalid. Returns whether a scan ran.
    pub fn poll(&mut self, root: &Group, accumulator: &mut ErrorAccumulator, now: Instant) -> bool {
        if self.debouncer.poll(now).is_none() {
            return false;
        }
        if !root.is_invalid() {
            debug!("change settled but form is valid; skipping scan");
            return false;
        }
        scan::scan(root, accumulator);
        true
    }

    /// Assigns a server error payload onto fields in the tree.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ReconcileError::MalformedPayload`] when the payload
    /// is not key-value shaped.
    pub fn apply_server_errors(&self, root: &mut Group, payload: &Value) -> Result<()> {
        server::apply_server_errors(root, payload)
    }

    /// Handles a submit attempt on an invalid form: touches every field and
    /// scans immediately, bypassing the debounce.
    pub fn submit_invalid(&self, root: &mut Group, accumulator: &mut ErrorAccumulator) {
        scan::submit_invalid(root, accumulator);
    }
}
