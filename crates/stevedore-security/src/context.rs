use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use stevedore_config::ContextBlock;

use crate::credential::Credential;

/// HTTP method applied when the credential is used to make a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
  #[default]
  #[serde(rename = "GET")]
  Get,
  #[serde(rename = "POST")]
  Post,
}

impl HttpMethod {
  pub fn as_str(self) -> &'static str {
    match self {
      HttpMethod::Get => "GET",
      HttpMethod::Post => "POST",
    }
  }
}

/// A resolved, normalized security context.
///
/// `method` and `headers` keep their wire-level presence: an absent `method`
/// stays `None` so re-serializing the context does not fabricate a key the
/// source document never had. Unrecognized keys are carried in `extra`, so
/// [`SecurityContext::to_block`] reproduces the source block exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityContext {
  pub name: String,
  pub credential: Credential,
  pub method: Option<HttpMethod>,
  pub headers: Option<BTreeMap<String, String>>,
  pub extra: ContextBlock,
}

impl SecurityContext {
  /// The method to use for authenticated requests; GET when unspecified.
  pub fn effective_method(&self) -> HttpMethod {
    self.method.unwrap_or_default()
  }

  /// Reconstruct the raw document block this context was resolved from.
  pub fn to_block(&self) -> ContextBlock {
    let mut block = ContextBlock::new();

    match &self.credential {
      Credential::Basic { username, password } => {
        block.insert("username".to_string(), Value::String(username.clone()));
        block.insert("password".to_string(), Value::String(password.clone()));
      }
      Credential::KeyPair {
        access_key,
        secret_key,
      } => {
        block.insert("access_key".to_string(), Value::String(access_key.clone()));
        block.insert("secret_key".to_string(), Value::String(secret_key.clone()));
      }
      Credential::Token {
        token,
        token_header,
      } => {
        block.insert("token".to_string(), Value::String(token.clone()));
        if let Some(header) = token_header {
          block.insert("token_header".to_string(), Value::String(header.clone()));
        }
      }
    }

    if let Some(method) = self.method {
      block.insert(
        "method".to_string(),
        Value::String(method.as_str().to_string()),
      );
    }

    if let Some(headers) = &self.headers {
      let headers = headers
        .iter()
        .map(|(key, value)| (key.clone(), Value::String(value.clone())))
        .collect();
      block.insert("headers".to_string(), Value::Object(headers));
    }

    for (key, value) in &self.extra {
      block.insert(key.clone(), value.clone());
    }

    block
  }
}
