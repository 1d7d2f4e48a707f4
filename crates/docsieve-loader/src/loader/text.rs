use std::path::Path;
use std::pin::Pin;

use docsieve_core::{Document, DocumentMetadata};

use crate::{DEFAULT_MAX_FILE_SIZE, DocumentError, DocumentLoader, checked_path};

pub struct TextLoader {
    pub max_file_size: u64,
}

impl Default for TextLoader {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl DocumentLoader for TextLoader {
    fn load(
        &self,
        path: &Path,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<Document>, DocumentError>> + Send + '_>>
    {
        let path = path.to_path_buf();
        let max_size = self.max_file_size;
        Box::pin(async move {
            let path = checked_path(&path, max_size).await?;

            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            let content_type = match ext.to_ascii_lowercase().as_str() {
                "md" | "markdown" => "text/markdown",
                _ => "text/plain",
            };

            // Undecodable bytes become U+FFFD so they surface as artifacts.
            let bytes = tokio::fs::read(&path).await?;
            let content = String::from_utf8_lossy(&bytes).into_owned();

            Ok(vec![Document::new(
                content,
                DocumentMetadata::new(path.display().to_string(), content_type),
            )])
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["txt", "md", "markdown"]
    }
}
