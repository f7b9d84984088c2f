//! # formloom
//!
//! Maps server-side and local validation failures onto a hierarchical form
//! model so a UI can display one message per field.
//!
//! This crate provides:
//! - A form tree of leaf [`Field`]s, named [`Group`]s, and ordered
//!   [`RepeatingGroup`]s, with dotted-path lookup
//! - A server-error mapper that attaches payload messages as synthetic
//!   failure kinds on matching fields
//! - A local-validation scanner that derives one message per invalid,
//!   interacted field into a caller-owned [`ErrorAccumulator`]
//! - A debounced, deduplicated change gate ([`Debouncer`]) driven by
//!   caller-supplied instants
//!
//! Validation rules themselves are evaluated elsewhere: an external engine
//! writes [`FailureKind`]s onto fields, and this crate only reads them.
//!
//! ## Quick start
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use formloom::{ErrorAccumulator, FailureKind, Field, GroupBuilder, Reconciler};
//!
//! let mut form = GroupBuilder::new()
//!     .field("email", Field::new("not-an-email").touched())
//!     .build();
//!
//! // The external rule engine reports failures; this crate only reads them.
//! form.field_mut("email")
//!     .unwrap()
//!     .set_failures(vec![FailureKind::Email]);
//!
//! let mut errors = ErrorAccumulator::for_form(&form);
//! let mut reconciler = Reconciler::new();
//!
//! let start = Instant::now();
//! reconciler.note_change(&form, start);
//! let scanned = reconciler.poll(&form, &mut errors, start + Duration::from_millis(400));
//! assert!(scanned);
//! assert_eq!(errors.message("email"), Some("Enter a valid email address."));
//! ```
//!
//! ## Server errors
//!
//! ```rust
//! use formloom::{Field, GroupBuilder, Reconciler};
//! use serde_json::json;
//!
//! let city = GroupBuilder::new().field("city", Field::empty()).build();
//! let mut form = GroupBuilder::new()
//!     .field("email", Field::empty())
//!     .group("address", city)
//!     .build();
//!
//! let reconciler = Reconciler::new();
//! let payload = json!({
//!     "email": ["Email taken", "second message is ignored"],
//!     "address": { "city": "Required" },
//! });
//! reconciler.apply_server_errors(&mut form, &payload).unwrap();
//!
//! assert!(form.field("email").unwrap().is_invalid());
//! assert!(form.field("address.city").unwrap().is_invalid());
//! ```
//!
//! ## Submit on an invalid form
//!
//! ```rust
//! use formloom::{ErrorAccumulator, FailureKind, Field, GroupBuilder, Reconciler};
//!
//! let mut form = GroupBuilder::new().field("name", Field::empty()).build();
//! form.field_mut("name")
//!     .unwrap()
//!     .set_failures(vec![FailureKind::Required]);
//!
//! let mut errors = ErrorAccumulator::for_form(&form);
//! let reconciler = Reconciler::new();
//!
//! // The field was never touched, but a submit attempt surfaces it anyway.
//! reconciler.submit_invalid(&mut form, &mut errors);
//! assert_eq!(errors.message("name"), Some("This field is required."));
//! ```

mod debounce;
mod error;
pub mod message;
mod reconciler;
mod scan;
mod server;
pub mod tree;

pub use debounce::{Debouncer, DEFAULT_QUIET_PERIOD};
pub use error::{ReconcileError, Result};
pub use message::{message_for, FailureKind};
pub use reconciler::Reconciler;
pub use scan::{scan, submit_invalid, AccumulatorEntry, ErrorAccumulator};
pub use server::apply_server_errors;
pub use tree::{Field, Group, GroupBuilder, Node, RepeatingGroup};
