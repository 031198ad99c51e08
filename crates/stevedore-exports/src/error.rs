use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportValidationError {
  #[error("duplicate export action id: {0}")]
  DuplicateActionId(String),

  #[error("export action {action}: missing required field {field}")]
  MissingRequiredField { action: String, field: &'static str },

  #[error("export action {action}: {field} must be {expected}")]
  InvalidFieldType {
    action: String,
    field: &'static str,
    expected: &'static str,
  },

  #[error("export action {action}: what must list at least one target")]
  EmptyTargetList { action: String },

  #[error("export action {action}: duplicate target {target}")]
  DuplicateTarget { action: String, target: String },

  #[error("export action {action}: invalid target {target}")]
  InvalidTargetFormat { action: String, target: String },

  #[error("export action {action}: security context {context} is not defined")]
  DanglingSecurityContextReference { action: String, context: String },
}
