use serde::{Deserialize, Serialize};

use crate::block::ActionBlock;

/// The export-actions document: `{"exports": [...]}` with no other top-level
/// keys permitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportsDoc {
  pub exports: Vec<ActionBlock>,
}
