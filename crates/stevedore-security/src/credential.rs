/// A credential bundle, one of three mutually exclusive shapes.
///
/// The wire format has no `type` field; the shape is inferred from which
/// required fields the raw block provides (`username`/`password`,
/// `access_key`/`secret_key`, or `token`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
  /// HTTP basic authentication. An empty password is valid and preserved.
  Basic { username: String, password: String },
  /// Access/secret key pair, as used by object stores and similar services.
  KeyPair { access_key: String, secret_key: String },
  /// Token authentication. Without `token_header` the token goes in the
  /// standard `Authorization` header.
  Token {
    token: String,
    token_header: Option<String>,
  },
}

impl Credential {
  /// Short shape label used in rejection messages.
  pub fn kind(&self) -> &'static str {
    match self {
      Credential::Basic { .. } => "basic",
      Credential::KeyPair { .. } => "key-pair",
      Credential::Token { .. } => "token",
    }
  }
}
