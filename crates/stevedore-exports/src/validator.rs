use std::collections::HashSet;

use serde_json::Value;
use stevedore_config::ActionBlock;
use tracing::debug;

use crate::action::ExportAction;
use crate::error::ExportValidationError;
use crate::target::ExportTarget;

/// Validate a list of raw export-action blocks against the set of known
/// security-context names.
///
/// The structural pass checks each action independently; the cross-reference
/// pass runs once all actions are shaped, because a `security-context`
/// reference is only meaningful against the complete context set. The first
/// violation rejects the whole list.
pub fn validate(
  actions: &[ActionBlock],
  known_contexts: &HashSet<String>,
) -> Result<Vec<ExportAction>, ExportValidationError> {
  let mut seen_ids: HashSet<String> = HashSet::new();
  let mut validated = Vec::with_capacity(actions.len());

  for (index, block) in actions.iter().enumerate() {
    let action = validate_block(index, block)?;
    if !seen_ids.insert(action.id.clone()) {
      return Err(ExportValidationError::DuplicateActionId(action.id));
    }
    validated.push(action);
  }

  for action in &validated {
    if let Some(context) = &action.security_context
      && !known_contexts.contains(context)
    {
      return Err(ExportValidationError::DanglingSecurityContextReference {
        action: action.id.clone(),
        context: context.clone(),
      });
    }
  }

  debug!(actions = validated.len(), "validated export actions");
  Ok(validated)
}

fn validate_block(
  index: usize,
  block: &ActionBlock,
) -> Result<ExportAction, ExportValidationError> {
  // Until the id is known, identify the action by its list position.
  let position = format!("#{index}");
  let id = require_string(&position, block, "id")?;
  let plugin = require_string(&id, block, "plugin")?;

  let raw_targets = match block.get("what") {
    None => {
      return Err(ExportValidationError::MissingRequiredField {
        action: id,
        field: "what",
      });
    }
    Some(Value::Array(raw_targets)) => raw_targets,
    Some(_) => {
      return Err(ExportValidationError::InvalidFieldType {
        action: id,
        field: "what",
        expected: "an array of target strings",
      });
    }
  };

  if raw_targets.is_empty() {
    return Err(ExportValidationError::EmptyTargetList { action: id });
  }

  let mut what = Vec::with_capacity(raw_targets.len());
  let mut seen_targets = HashSet::new();
  for raw in raw_targets {
    let Value::String(raw) = raw else {
      return Err(ExportValidationError::InvalidFieldType {
        action: id,
        field: "what",
        expected: "an array of target strings",
      });
    };
    if !seen_targets.insert(raw.as_str()) {
      return Err(ExportValidationError::DuplicateTarget {
        action: id,
        target: raw.clone(),
      });
    }
    let target: ExportTarget =
      raw
        .parse()
        .map_err(|_| ExportValidationError::InvalidTargetFormat {
          action: id.clone(),
          target: raw.clone(),
        })?;
    what.push(target);
  }

  let preferred_scheme = optional_string(&id, block, "preferred-scheme")?;
  let preferred_pid = optional_string(&id, block, "preferred-pid")?;

  let security_context = optional_string(&id, block, "security-context")?;
  if let Some(context) = &security_context
    && context.contains([':', ';'])
  {
    return Err(ExportValidationError::InvalidFieldType {
      action: id,
      field: "security-context",
      expected: "a context name without ':' or ';'",
    });
  }

  let setup = match block.get("setup") {
    None => None,
    Some(Value::Object(map)) if !map.is_empty() => Some(map.clone()),
    Some(_) => {
      return Err(ExportValidationError::InvalidFieldType {
        action: id,
        field: "setup",
        expected: "an object with at least one entry",
      });
    }
  };

  Ok(ExportAction {
    id,
    plugin,
    what,
    preferred_scheme,
    preferred_pid,
    security_context,
    setup,
  })
}

fn require_string(
  action: &str,
  block: &ActionBlock,
  field: &'static str,
) -> Result<String, ExportValidationError> {
  match block.get(field) {
    None => Err(ExportValidationError::MissingRequiredField {
      action: action.to_string(),
      field,
    }),
    Some(Value::String(value)) if !value.is_empty() => Ok(value.clone()),
    Some(_) => Err(ExportValidationError::InvalidFieldType {
      action: action.to_string(),
      field,
      expected: "a non-empty string",
    }),
  }
}

fn optional_string(
  action: &str,
  block: &ActionBlock,
  field: &'static str,
) -> Result<Option<String>, ExportValidationError> {
  match block.get(field) {
    None => Ok(None),
    Some(_) => require_string(action, block, field).map(Some),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::target::ItemKind;
  use serde_json::json;
  use stevedore_config::ExportsDoc;
  use stevedore_security::Credential;

  fn blocks(json: serde_json::Value) -> Vec<ActionBlock> {
    serde_json::from_value(json).unwrap()
  }

  fn contexts(names: &[&str]) -> HashSet<String> {
    names.iter().map(|n| n.to_string()).collect()
  }

  #[test]
  fn test_validate_minimal_action() {
    let actions = blocks(json!([
      {"id": "a1", "plugin": "zenodo", "what": [":stage-rocrate:full"]}
    ]));

    let validated = validate(&actions, &contexts(&[])).unwrap();
    assert_eq!(validated.len(), 1);
    assert_eq!(validated[0].id, "a1");
    assert_eq!(validated[0].plugin, "zenodo");
    assert_eq!(
      validated[0].what,
      vec![ExportTarget::StageCrate { full: true }]
    );
    assert_eq!(validated[0].security_context, None);
  }

  #[test]
  fn test_validate_full_action() {
    let actions = blocks(json!([{
      "id": "a1",
      "plugin": "zenodo",
      "what": ["output:mytool:result1", ":working-directory:"],
      "preferred-scheme": "doi",
      "preferred-pid": "doi:10.1234/x",
      "security-context": "myServer",
      "setup": {"community": "wfexs"}
    }]));

    let validated = validate(&actions, &contexts(&["myServer"])).unwrap();
    let action = &validated[0];
    assert_eq!(action.preferred_scheme.as_deref(), Some("doi"));
    assert_eq!(action.preferred_pid.as_deref(), Some("doi:10.1234/x"));
    assert_eq!(action.security_context.as_deref(), Some("myServer"));
    assert_eq!(action.setup.as_ref().unwrap()["community"], "wfexs");
    assert!(matches!(
      &action.what[0],
      ExportTarget::Item { kind: ItemKind::Output, .. }
    ));
  }

  #[test]
  fn test_duplicate_action_id() {
    let actions = blocks(json!([
      {"id": "a1", "plugin": "zenodo", "what": [":stage-rocrate:"]},
      {"id": "a1", "plugin": "b2share", "what": [":provenance-rocrate:"]}
    ]));

    let result = validate(&actions, &contexts(&[]));
    assert!(matches!(
      result,
      Err(ExportValidationError::DuplicateActionId(id)) if id == "a1"
    ));
  }

  #[test]
  fn test_missing_required_fields() {
    let actions = blocks(json!([{"plugin": "zenodo", "what": [":stage-rocrate:"]}]));
    let result = validate(&actions, &contexts(&[]));
    assert!(matches!(
      result,
      Err(ExportValidationError::MissingRequiredField { action, field: "id" }) if action == "#0"
    ));

    let actions = blocks(json!([{"id": "a1", "what": [":stage-rocrate:"]}]));
    let result = validate(&actions, &contexts(&[]));
    assert!(matches!(
      result,
      Err(ExportValidationError::MissingRequiredField { field: "plugin", .. })
    ));

    let actions = blocks(json!([{"id": "a1", "plugin": "zenodo"}]));
    let result = validate(&actions, &contexts(&[]));
    assert!(matches!(
      result,
      Err(ExportValidationError::MissingRequiredField { field: "what", .. })
    ));
  }

  #[test]
  fn test_empty_target_list() {
    let actions = blocks(json!([{"id": "a1", "plugin": "zenodo", "what": []}]));

    let result = validate(&actions, &contexts(&[]));
    assert!(matches!(
      result,
      Err(ExportValidationError::EmptyTargetList { action }) if action == "a1"
    ));
  }

  #[test]
  fn test_duplicate_target() {
    let actions = blocks(json!([
      {"id": "a1", "plugin": "zenodo", "what": ["param:genome", "param:genome"]}
    ]));

    let result = validate(&actions, &contexts(&[]));
    assert!(matches!(
      result,
      Err(ExportValidationError::DuplicateTarget { target, .. }) if target == "param:genome"
    ));
  }

  #[test]
  fn test_invalid_target_format() {
    let actions = blocks(json!([
      {"id": "a1", "plugin": "zenodo", "what": ["output:a:b:c"]}
    ]));

    let result = validate(&actions, &contexts(&[]));
    assert!(matches!(
      result,
      Err(ExportValidationError::InvalidTargetFormat { target, .. }) if target == "output:a:b:c"
    ));
  }

  #[test]
  fn test_dangling_security_context_reference() {
    let actions = blocks(json!([{
      "id": "a1",
      "plugin": "zenodo",
      "what": [":stage-rocrate:full"],
      "security-context": "otherServer"
    }]));

    let result = validate(&actions, &contexts(&["myServer"]));
    assert!(matches!(
      result,
      Err(ExportValidationError::DanglingSecurityContextReference { action, context })
        if action == "a1" && context == "otherServer"
    ));
  }

  #[test]
  fn test_security_context_with_reserved_characters() {
    let actions = blocks(json!([{
      "id": "a1",
      "plugin": "zenodo",
      "what": [":stage-rocrate:full"],
      "security-context": "my:server"
    }]));

    let result = validate(&actions, &contexts(&["my:server"]));
    assert!(matches!(
      result,
      Err(ExportValidationError::InvalidFieldType { field: "security-context", .. })
    ));
  }

  #[test]
  fn test_empty_setup_rejected() {
    let actions = blocks(json!([
      {"id": "a1", "plugin": "zenodo", "what": [":stage-rocrate:"], "setup": {}}
    ]));

    let result = validate(&actions, &contexts(&[]));
    assert!(matches!(
      result,
      Err(ExportValidationError::InvalidFieldType { field: "setup", .. })
    ));
  }

  #[test]
  fn test_round_trip_preserves_recognized_fields() {
    let raw = json!([{
      "id": "a1",
      "plugin": "zenodo",
      "what": [":stage-rocrate:full", "output:mytool:result1"],
      "preferred-pid": "doi:10.1234/x",
      "security-context": "myServer",
      "setup": {"community": "wfexs"}
    }]);
    let actions = blocks(raw.clone());

    let validated = validate(&actions, &contexts(&["myServer"])).unwrap();
    assert_eq!(serde_json::to_value(&validated).unwrap(), raw);
  }

  #[test]
  fn test_scenario_with_resolved_contexts() {
    // End to end: resolve the contexts document first, then validate the
    // actions against the resolved names.
    let contexts_doc: stevedore_config::SecurityContextsDoc =
      serde_json::from_value(json!({"myServer": {"username": "bob", "password": ""}})).unwrap();
    let resolved = stevedore_security::resolve_all(&contexts_doc).unwrap();
    assert!(matches!(
      resolved["myServer"].credential,
      Credential::Basic { .. }
    ));

    let doc: ExportsDoc = serde_json::from_value(json!({"exports": [{
      "id": "a1",
      "plugin": "zenodo",
      "what": [":stage-rocrate:full"],
      "security-context": "myServer"
    }]}))
    .unwrap();

    let known: HashSet<String> = resolved.keys().cloned().collect();
    let validated = validate(&doc.exports, &known).unwrap();
    assert_eq!(validated.len(), 1);
    assert_eq!(validated[0].security_context.as_deref(), Some("myServer"));
  }
}
