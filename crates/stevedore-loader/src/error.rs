use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
  #[error("failed to read document {path}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("document {path} is not valid JSON")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}
