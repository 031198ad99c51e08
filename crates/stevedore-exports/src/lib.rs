//! Stevedore Exports
//!
//! Validation of export-action declarations: the units of work that copy or
//! register pipeline outputs under a permanent identifier via a plugin.
//!
//! Validation runs in two passes. The structural pass checks each action on
//! its own (required fields, unique ids, the target grammar). The
//! cross-reference pass then checks every `security-context` reference
//! against the full set of resolved context names, which is why contexts must
//! be resolved before actions can be accepted.

mod action;
mod error;
mod target;
mod validator;

pub use action::ExportAction;
pub use error::ExportValidationError;
pub use target::{CrateContent, ExportTarget, ItemKind, ParseTargetError};
pub use validator::validate;
