use std::path::Path;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use stevedore_config::{ExportsDoc, SecurityContextsDoc};
use tokio::fs;
use tracing::debug;

use crate::error::LoaderError;
use crate::loader::DocumentLoader;

/// Filesystem-based document loader reading JSON files.
#[derive(Debug, Default)]
pub struct FsDocumentLoader;

impl FsDocumentLoader {
  pub fn new() -> Self {
    Self
  }

  async fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T, LoaderError> {
    let content = fs::read_to_string(path).await.map_err(|source| LoaderError::Io {
      path: path.to_path_buf(),
      source,
    })?;

    serde_json::from_str(&content).map_err(|source| LoaderError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }
}

#[async_trait]
impl DocumentLoader for FsDocumentLoader {
  async fn load_exports(&self, path: &Path) -> Result<ExportsDoc, LoaderError> {
    debug!(path = %path.display(), "loading export-actions document");
    self.read_json(path).await
  }

  async fn load_security_contexts(
    &self,
    path: &Path,
  ) -> Result<SecurityContextsDoc, LoaderError> {
    debug!(path = %path.display(), "loading security-contexts document");
    self.read_json(path).await
  }
}
