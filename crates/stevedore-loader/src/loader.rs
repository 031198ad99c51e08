use std::path::Path;

use async_trait::async_trait;
use stevedore_config::{ExportsDoc, SecurityContextsDoc};

use crate::error::LoaderError;

/// Supplies parsed configuration documents to the validation core.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
  /// Load an export-actions document.
  async fn load_exports(&self, path: &Path) -> Result<ExportsDoc, LoaderError>;

  /// Load a security-contexts document.
  async fn load_security_contexts(
    &self,
    path: &Path,
  ) -> Result<SecurityContextsDoc, LoaderError>;
}
