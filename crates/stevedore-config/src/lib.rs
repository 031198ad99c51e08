//! Stevedore Config
//!
//! This crate contains the wire-format types for the two configuration
//! documents a workflow backend consumes before running export actions:
//!
//! - a security-contexts document, mapping context names to credential blocks
//! - an export-actions document, listing the exports to perform
//!
//! Both documents arrive as already-parsed JSON. The blocks inside them stay
//! generic maps here: which credential shape a block satisfies, and whether an
//! action is well-formed, is decided by the resolver and validator crates, not
//! by deserialization.

mod block;
mod contexts;
mod exports;

pub use block::{ActionBlock, ContextBlock};
pub use contexts::SecurityContextsDoc;
pub use exports::ExportsDoc;
