//! Validation failure kinds and the message formatter.
//!
//! The formatter is a pure mapping from a field's active failure kinds to a
//! single display string. Kinds are checked in a fixed priority order, so a
//! field carrying several simultaneous failures only ever surfaces one
//! message.

use serde::Serialize;

/// A named validation rule outcome with its kind-specific parameters.
///
/// Failure kinds are produced by an external rule-evaluation engine; this
/// crate only reads them. The one exception is [`FailureKind::Server`], which
/// the server-error mapper injects after a failed submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FailureKind {
    /// Value exceeds the configured maximum length.
    MaxLength {
        /// Configured character limit.
        limit: usize,
        /// Observed character count.
        actual: usize,
    },
    /// Value is not a well-formed email address.
    Email,
    /// Value is missing.
    Required,
    /// Numeric value is below the configured minimum.
    MinValue {
        /// Configured lower bound.
        min: f64,
        /// Observed value.
        actual: f64,
    },
    /// Numeric value is above the configured maximum.
    MaxValue {
        /// Configured upper bound.
        max: f64,
        /// Observed value.
        actual: f64,
    },
    /// Value does not match the configured pattern.
    Pattern,
    /// Message attached from a server error payload.
    Server(String),
}

impl FailureKind {
    /// Display priority; lower ranks win when several kinds coexist.
    fn rank(&self) -> u8 {
        match self {
            Self::MaxLength { .. } => 0,
            Self::Email => 1,
            Self::Required => 2,
            Self::MinValue { .. } => 3,
            Self::MaxValue { .. } => 4,
            Self::Pattern => 5,
            Self::Server(_) => 6,
        }
    }

    /// Returns the display message for this kind.
    ///
    /// Length and range kinds interpolate both the configured bound and the
    /// observed value.
    pub fn message(&self) -> String {
        match self {
            Self::MaxLength { limit, actual } => {
                format!("Ensure this value has at most {limit} characters (it has {actual}).")
            }
            Self::Email => "Enter a valid email address.".to_string(),
            Self::Required => "This field is required.".to_string(),
            Self::MinValue { min, actual } => {
                format!("Ensure this value is greater than or equal to {min} (it is {actual}).")
            }
            Self::MaxValue { max, actual } => {
                format!("Ensure this value is less than or equal to {max} (it is {actual}).")
            }
            Self::Pattern => "Enter a valid value.".to_string(),
            Self::Server(message) => message.clone(),
        }
    }
}

/// Derives the single display message for a field's active failure kinds.
///
/// Kinds are checked in fixed priority order: max-length, email, required,
/// min-value, max-value, pattern, server. The first match wins. An empty
/// failure set yields an empty string, never an error.
pub fn message_for(failures: &[FailureKind]) -> String {
    failures
        .iter()
        .min_by_key(|kind| kind.rank())
        .map(FailureKind::message)
        .unwrap_or_default()
}
