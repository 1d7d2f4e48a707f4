//! Document sources: turn files on disk into a [`DocumentCollection`].
//!
//! [`DocumentCollection`]: docsieve_core::DocumentCollection

pub mod directory;
pub mod error;
pub mod loader;

pub use directory::DirectoryLoader;
pub use docsieve_core::config::DEFAULT_MAX_FILE_SIZE;
pub use error::DocumentError;
pub use loader::{JsonlLoader, TextLoader};

#[cfg(feature = "pdf")]
pub use loader::PdfLoader;

use docsieve_core::Document;

pub trait DocumentLoader: Send + Sync {
    fn load(
        &self,
        path: &std::path::Path,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Vec<Document>, DocumentError>> + Send + '_>,
    >;

    fn supported_extensions(&self) -> &[&str];
}

/// Canonicalize `path` and reject files above `max_size` bytes.
pub(crate) async fn checked_path(
    path: &std::path::Path,
    max_size: u64,
) -> Result<std::path::PathBuf, DocumentError> {
    let path = tokio::fs::canonicalize(path).await?;
    let meta = tokio::fs::metadata(&path).await?;
    if meta.len() > max_size {
        return Err(DocumentError::FileTooLarge(meta.len()));
    }
    Ok(path)
}
