//! Stevedore Loader
//!
//! The document-loading seam between the filesystem and the validation core.
//! The core never opens files itself; it receives already-parsed documents
//! through the [`DocumentLoader`] trait. [`FsDocumentLoader`] is the JSON
//! filesystem implementation.

mod error;
mod fs_loader;
mod loader;

pub use error::LoaderError;
pub use fs_loader::FsDocumentLoader;
pub use loader::DocumentLoader;
