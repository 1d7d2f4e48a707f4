use std::path::Path;
use std::pin::Pin;

use docsieve_core::{Document, DocumentMetadata};

use crate::{DEFAULT_MAX_FILE_SIZE, DocumentError, DocumentLoader, checked_path};

/// One document per PDF page, tagged with a 0-based `page` metadata key.
pub struct PdfLoader {
    pub max_file_size: u64,
}

impl Default for PdfLoader {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl DocumentLoader for PdfLoader {
    fn load(
        &self,
        path: &Path,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<Document>, DocumentError>> + Send + '_>>
    {
        let path = path.to_path_buf();
        let max_size = self.max_file_size;
        Box::pin(async move {
            let path = checked_path(&path, max_size).await?;

            let source = path.display().to_string();
            let path_buf = path.clone();
            let pages = tokio::task::spawn_blocking(move || {
                pdf_extract::extract_text_by_pages(&path_buf)
                    .map_err(|e| DocumentError::Pdf(e.to_string()))
            })
            .await
            .map_err(|e| DocumentError::Io(std::io::Error::other(e)))??;

            tracing::debug!("extracted {} pages from {source}", pages.len());

            Ok(pages
                .into_iter()
                .enumerate()
                .map(|(page, content)| {
                    let mut metadata = DocumentMetadata::new(source.clone(), "application/pdf");
                    metadata.extra.insert("page".into(), page.into());
                    Document::new(content, metadata)
                })
                .collect())
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }
}
