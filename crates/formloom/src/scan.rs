//! Local-validation scanner and the caller-owned error accumulator.
//!
//! A scan walks the root group's immediate children and derives one display
//! message for every field that is currently invalid and interacted with.
//! Repeating groups are scanned row by row; plain nested groups are not
//! descended into (they are only reached through the server-error path).

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::message::message_for;
use crate::tree::{Group, Node};

/// One accumulator slot: a single message for a leaf field, or ordered
/// per-row message maps for a repeating group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AccumulatorEntry {
    /// Message slot for a leaf field; `None` while the field is clean.
    Message(Option<String>),
    /// One message map per row, in row order.
    Rows(Vec<BTreeMap<String, String>>),
}

/// Caller-owned, UI-facing store of per-field messages.
///
/// Slots are declared up front from the form's top-level child names; scans
/// only update existing slots, and a write to an unknown name is a no-op.
/// Each scan overwrites slots rather than merging into them. The caller
/// creates the accumulator once per form session and owns it throughout;
/// this crate mutates it, never replaces it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrorAccumulator {
    entries: Vec<(String, AccumulatorEntry)>,
}

impl ErrorAccumulator {
    /// Declares slots for every top-level field and repeating group of the
    /// form. Plain nested groups get no slot: the scanner never writes
    /// messages for them.
    #[must_use]
    pub fn for_form(root: &Group) -> Self {
        let mut entries = Vec::new();
        for (name, node) in root.children() {
            match node {
                Node::Field(_) => {
                    entries.push((name.to_string(), AccumulatorEntry::Message(None)));
                }
                Node::Repeating(_) => {
                    entries.push((name.to_string(), AccumulatorEntry::Rows(Vec::new())));
                }
                Node::Group(_) => {}
            }
        }
        Self { entries }
    }

    /// Returns the message for a leaf field slot, if one is set.
    pub fn message(&self, name: &str) -> Option<&str> {
        match self.entry(name)? {
            AccumulatorEntry::Message(message) => message.as_deref(),
            AccumulatorEntry::Rows(_) => None,
        }
    }

    /// Returns the per-row message maps for a repeating group slot.
    pub fn rows(&self, name: &str) -> Option<&[BTreeMap<String, String>]> {
        match self.entry(name)? {
            AccumulatorEntry::Rows(rows) => Some(rows),
            AccumulatorEntry::Message(_) => None,
        }
    }

    /// Returns whether no slot currently holds a message.
    pub fn is_clear(&self) -> bool {
        self.entries.iter().all(|(_, entry)| match entry {
            AccumulatorEntry::Message(message) => message.is_none(),
            AccumulatorEntry::Rows(rows) => rows.iter().all(BTreeMap::is_empty),
        })
    }

    fn entry(&self, name: &str) -> Option<&AccumulatorEntry> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, entry)| entry)
    }

    fn set_message(&mut self, name: &str, message: Option<String>) {
        if let Some((_, entry)) = self.entries.iter_mut().find(|(n, _)| n == name) {
            *entry = AccumulatorEntry::Message(message);
        }
    }

    fn set_rows(&mut self, name: &str, rows: Vec<BTreeMap<String, String>>) {
        if let Some((_, entry)) = self.entries.iter_mut().find(|(n, _)| n == name) {
            *entry = AccumulatorEntry::Rows(rows);
        }
    }
}

/// Walks the root group's immediate children and overwrites accumulator
/// slots with the current messages.
///
/// A leaf field yields a message only while it is invalid and interacted
/// with (dirty or touched); otherwise its slot is cleared. A repeating
/// group's slot is replaced with exactly one map per row, each holding
/// entries only for that row's invalid and interacted fields.
pub fn scan(root: &Group, accumulator: &mut ErrorAccumulator) {
    for (name, node) in root.children() {
        match node {
            Node::Field(field) => {
                let message = (field.is_invalid() && field.is_interacted())
                    .then(|| message_for(field.failures()));
                accumulator.set_message(name, message);
            }
            Node::Repeating(repeating) => {
                let mut rows = Vec::with_capacity(repeating.len());
                for row in repeating.rows() {
                    let mut messages = BTreeMap::new();
                    for (field_name, child) in row.children() {
                        if let Node::Field(field) = child {
                            if field.is_invalid() && field.is_interacted() {
                                messages
                                    .insert(field_name.to_string(), message_for(field.failures()));
                            }
                        }
                    }
                    rows.push(messages);
                }
                accumulator.set_rows(name, rows);
            }
            // Plain nested groups are only reached through the server-error
            // path; the scanner stays at the top level.
            Node::Group(_) => {}
        }
    }
    debug!("scan complete");
}

/// Submit attempted on an invalid form: marks every field as touched, then
/// scans immediately so newly-touched invalid fields surface without waiting
/// for another value change.
pub fn submit_invalid(root: &mut Group, accumulator: &mut ErrorAccumulator) {
    root.mark_all_touched();
    scan(root, accumulator);
}
