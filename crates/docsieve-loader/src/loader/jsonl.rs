use std::path::Path;
use std::pin::Pin;

use docsieve_core::Document;

use crate::{DEFAULT_MAX_FILE_SIZE, DocumentError, DocumentLoader, checked_path};

/// Loads pre-chunked exports: one JSON object per line, shaped like
/// `{"content": "...", "metadata": {"source": "...", ...}}`. `page_content`
/// is accepted in place of `content`, and a missing content field yields an
/// empty document.
pub struct JsonlLoader {
    pub max_file_size: u64,
}

impl Default for JsonlLoader {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

fn parse_lines(raw: &str, origin: &str) -> Result<Vec<Document>, DocumentError> {
    let mut documents = Vec::new();
    for (i, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = i + 1;
        let mut doc: Document = serde_json::from_str(line).map_err(|source| DocumentError::Json {
            line: line_no,
            source,
        })?;
        if doc.metadata.source.is_empty() {
            doc.metadata.source = format!("{origin}:{line_no}");
        }
        if doc.metadata.content_type.is_empty() {
            "text/plain".clone_into(&mut doc.metadata.content_type);
        }
        documents.push(doc);
    }
    Ok(documents)
}

impl DocumentLoader for JsonlLoader {
    fn load(
        &self,
        path: &Path,
    ) -> Pin<Box<dyn std::future::Future<Output = Result<Vec<Document>, DocumentError>> + Send + '_>>
    {
        let path = path.to_path_buf();
        let max_size = self.max_file_size;
        Box::pin(async move {
            let path = checked_path(&path, max_size).await?;
            let bytes = tokio::fs::read(&path).await?;
            let raw = String::from_utf8_lossy(&bytes);
            let documents = parse_lines(&raw, &path.display().to_string())?;
            tracing::debug!("parsed {} records from {}", documents.len(), path.display());
            Ok(documents)
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["jsonl", "ndjson"]
    }
}
