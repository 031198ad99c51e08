use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextError {
  #[error("unknown security context: {0}")]
  UnknownContext(String),

  #[error("security context name must not contain ':' or ';': {0}")]
  InvalidContextName(String),

  #[error(
    "security context {name} is ambiguous: matches both the {first} and {second} credential shapes"
  )]
  AmbiguousCredential {
    name: String,
    first: &'static str,
    second: &'static str,
  },

  #[error("security context {0} matches no credential shape")]
  IncompleteCredential(String),

  #[error("security context {name}: {field} must not be empty")]
  InvalidFieldLength { name: String, field: &'static str },

  #[error("security context {name}: {field} must be {expected}")]
  InvalidFieldType {
    name: String,
    field: &'static str,
    expected: &'static str,
  },
}
