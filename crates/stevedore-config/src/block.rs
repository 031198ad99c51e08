/// A raw security-context block: an open object whose credential shape is
/// determined structurally, after parsing.
pub type ContextBlock = serde_json::Map<String, serde_json::Value>;

/// A raw export-action block, before validation.
pub type ActionBlock = serde_json::Map<String, serde_json::Value>;
