//! Maps structured server error payloads onto fields in the tree.
//!
//! A payload is a JSON object keyed by field or group name. Leaf entries
//! carry an ordered list of messages; group entries carry one more level of
//! sub-field name to message. Deeper nesting is unsupported and must be
//! flattened by the caller.

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ReconcileError, Result};
use crate::message::FailureKind;
use crate::tree::{Group, Node};

/// Assigns server error messages to matching fields in the tree.
///
/// For a list entry, only the first message is attached (one message per
/// field at a time). For a nested entry, each inner key is first looked up
/// flat under the root; if that misses, the outer key is resolved as a group
/// and the inner key within it. Messages whose path matches nothing are
/// dropped silently.
///
/// Mutates field failure state only, never the accumulator.
///
/// # Errors
///
/// Returns [`ReconcileError::MalformedPayload`] when the payload is not a
/// JSON object; the caller should show a generic fallback instead of
/// per-field messages.
pub fn apply_server_errors(root: &mut Group, payload: &Value) -> Result<()> {
    let Value::Object(entries) = payload else {
        let found = json_type_name(payload);
        warn!(found, "refusing server error payload that is not key-value shaped");
        return Err(ReconcileError::MalformedPayload { found });
    };

    for (key, value) in entries {
        match value {
            Value::Array(messages) => {
                let Some(first) = messages.first().and_then(Value::as_str) else {
                    debug!(field = %key, "server error entry has no leading string message");
                    continue;
                };
                if !attach(root, key, first) {
                    debug!(path = %key, "no field matches server error key; dropping message");
                }
            }
            Value::Object(nested) => {
                for (inner, message) in nested {
                    let Some(text) = message.as_str() else {
                        debug!(field = %inner, "nested server error message is not a string");
                        continue;
                    };
                    // Some services key nested errors by the leaf name alone,
                    // so a flat lookup under the root comes first.
                    if attach(root, inner, text) {
                        continue;
                    }
                    let path = format!("{key}.{inner}");
                    if !attach(root, &path, text) {
                        debug!(%path, "no field matches nested server error key; dropping message");
                    }
                }
            }
            _ => {
                debug!(field = %key, "skipping server error entry with unsupported shape");
            }
        }
    }
    Ok(())
}

/// Attaches a message as a synthetic server failure on the field at `path`.
/// Returns false when the path misses or names a non-field node.
fn attach(root: &mut Group, path: &str, message: &str) -> bool {
    match root.get_mut(path) {
        Some(Node::Field(field)) => {
            field.push_failure(FailureKind::Server(message.to_string()));
            true
        }
        _ => false,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
