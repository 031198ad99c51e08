//! Stevedore Security
//!
//! Resolution of named security contexts into normalized, typed credentials.
//! A raw context block carries no discriminant tag; which credential shape it
//! satisfies is decided by structural field matching, and a block satisfying
//! more than one shape (or none) is rejected outright.
//!
//! Resolution is a pure function over an already-loaded document: no I/O, no
//! credential storage, no network.

mod context;
mod credential;
mod error;
mod resolver;

pub use context::{HttpMethod, SecurityContext};
pub use credential::Credential;
pub use error::ContextError;
pub use resolver::{resolve, resolve_all};
