use std::collections::BTreeMap;

use serde_json::Value;
use stevedore_config::{ContextBlock, SecurityContextsDoc};
use tracing::debug;

use crate::context::{HttpMethod, SecurityContext};
use crate::credential::Credential;
use crate::error::ContextError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CredentialKind {
  Basic,
  KeyPair,
  Token,
}

impl CredentialKind {
  fn label(self) -> &'static str {
    match self {
      CredentialKind::Basic => "basic",
      CredentialKind::KeyPair => "key-pair",
      CredentialKind::Token => "token",
    }
  }

  /// The required-field set that selects this shape.
  fn required_fields(self) -> &'static [&'static str] {
    match self {
      CredentialKind::Basic => &["username", "password"],
      CredentialKind::KeyPair => &["access_key", "secret_key"],
      CredentialKind::Token => &["token"],
    }
  }

  /// All keys this shape consumes, including transport settings.
  fn consumed_fields(self) -> &'static [&'static str] {
    match self {
      CredentialKind::Basic => &["username", "password", "method", "headers"],
      CredentialKind::KeyPair => &["access_key", "secret_key", "method", "headers"],
      CredentialKind::Token => &["token", "token_header", "method", "headers"],
    }
  }
}

const ALL_KINDS: [CredentialKind; 3] = [
  CredentialKind::Basic,
  CredentialKind::KeyPair,
  CredentialKind::Token,
];

/// Resolve a single named security context from the raw document.
pub fn resolve(
  context_name: &str,
  raw_contexts: &SecurityContextsDoc,
) -> Result<SecurityContext, ContextError> {
  let block = raw_contexts
    .get(context_name)
    .ok_or_else(|| ContextError::UnknownContext(context_name.to_string()))?;

  resolve_block(context_name, block)
}

/// Resolve every context in the document.
///
/// Any invalid entry rejects the whole document; partial acceptance of
/// misconfigured credentials is not an option.
pub fn resolve_all(
  raw_contexts: &SecurityContextsDoc,
) -> Result<BTreeMap<String, SecurityContext>, ContextError> {
  let mut resolved = BTreeMap::new();
  for (name, block) in &raw_contexts.0 {
    let context = resolve_block(name, block)?;
    resolved.insert(name.clone(), context);
  }

  debug!(contexts = resolved.len(), "resolved security contexts");
  Ok(resolved)
}

fn resolve_block(name: &str, block: &ContextBlock) -> Result<SecurityContext, ContextError> {
  if name.contains([':', ';']) {
    return Err(ContextError::InvalidContextName(name.to_string()));
  }

  // Structural matching: a shape applies when all of its required fields are
  // present. More than one applicable shape is ambiguous, not a preference.
  let matched: Vec<CredentialKind> = ALL_KINDS
    .into_iter()
    .filter(|kind| {
      kind
        .required_fields()
        .iter()
        .all(|field| block.contains_key(*field))
    })
    .collect();

  let kind = match matched.as_slice() {
    [] => return Err(ContextError::IncompleteCredential(name.to_string())),
    [kind] => *kind,
    [first, second, ..] => {
      return Err(ContextError::AmbiguousCredential {
        name: name.to_string(),
        first: first.label(),
        second: second.label(),
      });
    }
  };

  let credential = match kind {
    CredentialKind::Basic => Credential::Basic {
      username: require_string(name, block, "username", 1)?,
      // An empty password is legitimate and must survive resolution.
      password: require_string(name, block, "password", 0)?,
    },
    CredentialKind::KeyPair => Credential::KeyPair {
      access_key: require_string(name, block, "access_key", 1)?,
      secret_key: require_string(name, block, "secret_key", 1)?,
    },
    CredentialKind::Token => Credential::Token {
      token: require_string(name, block, "token", 1)?,
      token_header: optional_string(name, block, "token_header")?,
    },
  };

  let method = match block.get("method") {
    None => None,
    Some(Value::String(s)) => match s.as_str() {
      "GET" => Some(HttpMethod::Get),
      "POST" => Some(HttpMethod::Post),
      _ => {
        return Err(ContextError::InvalidFieldType {
          name: name.to_string(),
          field: "method",
          expected: "\"GET\" or \"POST\"",
        });
      }
    },
    Some(_) => {
      return Err(ContextError::InvalidFieldType {
        name: name.to_string(),
        field: "method",
        expected: "\"GET\" or \"POST\"",
      });
    }
  };

  let headers = match block.get("headers") {
    None => None,
    Some(Value::Object(map)) => {
      let mut headers = BTreeMap::new();
      for (key, value) in map {
        let Value::String(value) = value else {
          return Err(ContextError::InvalidFieldType {
            name: name.to_string(),
            field: "headers",
            expected: "a mapping of header names to string values",
          });
        };
        headers.insert(key.clone(), value.clone());
      }
      Some(headers)
    }
    Some(_) => {
      return Err(ContextError::InvalidFieldType {
        name: name.to_string(),
        field: "headers",
        expected: "a mapping of header names to string values",
      });
    }
  };

  // Anything the matched shape did not consume is an open extension point.
  let consumed = kind.consumed_fields();
  let extra: ContextBlock = block
    .iter()
    .filter(|(key, _)| !consumed.contains(&key.as_str()))
    .map(|(key, value)| (key.clone(), value.clone()))
    .collect();

  debug!(context = name, kind = kind.label(), "resolved security context");

  Ok(SecurityContext {
    name: name.to_string(),
    credential,
    method,
    headers,
    extra,
  })
}

fn require_string(
  name: &str,
  block: &ContextBlock,
  field: &'static str,
  min_len: usize,
) -> Result<String, ContextError> {
  let Some(Value::String(value)) = block.get(field) else {
    return Err(ContextError::InvalidFieldType {
      name: name.to_string(),
      field,
      expected: "a string",
    });
  };

  if value.len() < min_len {
    return Err(ContextError::InvalidFieldLength {
      name: name.to_string(),
      field,
    });
  }

  Ok(value.clone())
}

fn optional_string(
  name: &str,
  block: &ContextBlock,
  field: &'static str,
) -> Result<Option<String>, ContextError> {
  match block.get(field) {
    None => Ok(None),
    Some(_) => require_string(name, block, field, 1).map(Some),
  }
}
