use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::block::ContextBlock;

/// The security-contexts document: a mapping of context name to credential
/// block.
///
/// Names are expected to match `^[^:;]+$`; that constraint is enforced when a
/// context is resolved, not here. Blocks stay raw so that unrecognized keys
/// survive a round trip through validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecurityContextsDoc(pub BTreeMap<String, ContextBlock>);

impl SecurityContextsDoc {
  /// Look up the raw block for a context name.
  pub fn get(&self, name: &str) -> Option<&ContextBlock> {
    self.0.get(name)
  }

  /// Iterate over the declared context names.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_contexts_document() {
    let doc: SecurityContextsDoc = serde_json::from_str(
      r#"{"myServer": {"username": "bob", "password": ""}, "vault": {"token": "abc"}}"#,
    )
    .unwrap();

    assert_eq!(doc.len(), 2);
    assert!(doc.get("myServer").is_some());
    assert_eq!(doc.names().collect::<Vec<_>>(), vec!["myServer", "vault"]);
  }

  #[test]
  fn test_rejects_non_object_block() {
    let result = serde_json::from_str::<SecurityContextsDoc>(r#"{"myServer": "bob"}"#);
    assert!(result.is_err());
  }
}
