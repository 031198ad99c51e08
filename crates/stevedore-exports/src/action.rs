use serde::Serialize;
use serde_json::{Map, Value};

use crate::target::ExportTarget;

/// A validated export action, ready to hand to an export plugin.
///
/// Serialization reproduces the original document keys, so a validated action
/// written back out matches its source block for every recognized field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportAction {
  pub id: String,
  /// Opaque plugin identifier, resolved by an external plugin registry.
  pub plugin: String,
  pub what: Vec<ExportTarget>,
  #[serde(rename = "preferred-scheme", skip_serializing_if = "Option::is_none")]
  pub preferred_scheme: Option<String>,
  #[serde(rename = "preferred-pid", skip_serializing_if = "Option::is_none")]
  pub preferred_pid: Option<String>,
  /// Reference into the security-contexts document, checked during the
  /// cross-reference pass.
  #[serde(rename = "security-context", skip_serializing_if = "Option::is_none")]
  pub security_context: Option<String>,
  /// Plugin-specific parameters, opaque to validation.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub setup: Option<Map<String, Value>>,
}
