//! Error types for reconciliation.

use thiserror::Error;

/// Errors surfaced by the reconciler.
///
/// Lookup misses and unmatched failure kinds are not errors: they degrade to
/// "no message shown". Only a server payload that is not key-value shaped is
/// surfaced, so the caller can fall back to a generic notification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReconcileError {
    /// Server error payload was not a JSON object.
    #[error("malformed server error payload: expected an object, found {found}")]
    MalformedPayload {
        /// JSON type actually found at the top level.
        found: &'static str,
    },
}

/// Result type alias for reconciliation operations.
pub type Result<T> = std::result::Result<T, ReconcileError>;
