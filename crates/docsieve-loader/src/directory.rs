use std::path::{Path, PathBuf};

use docsieve_core::DocumentCollection;

use crate::{DEFAULT_MAX_FILE_SIZE, DocumentError, DocumentLoader, JsonlLoader, TextLoader};

/// Walks a root directory and dispatches every matching file to the loader
/// registered for its extension.
///
/// Files are visited in sorted path order, so the resulting collection (and
/// every index in a report built from it) is stable across runs.
pub struct DirectoryLoader {
    pattern: String,
    loaders: Vec<Box<dyn DocumentLoader>>,
}

impl DirectoryLoader {
    /// A loader with no registered formats. See [`Self::with_defaults`].
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            loaders: Vec::new(),
        }
    }

    /// Text and JSONL loaders, plus PDF when the `pdf` feature is enabled.
    #[must_use]
    pub fn with_defaults(pattern: impl Into<String>, max_file_size: u64) -> Self {
        #[cfg_attr(not(feature = "pdf"), allow(unused_mut))]
        let mut loaders: Vec<Box<dyn DocumentLoader>> = vec![
            Box::new(TextLoader { max_file_size }),
            Box::new(JsonlLoader { max_file_size }),
        ];
        #[cfg(feature = "pdf")]
        loaders.push(Box::new(crate::PdfLoader { max_file_size }));

        Self {
            pattern: pattern.into(),
            loaders,
        }
    }

    #[must_use]
    pub fn register(mut self, loader: impl DocumentLoader + 'static) -> Self {
        self.loaders.push(Box::new(loader));
        self
    }

    fn loader_for(&self, path: &Path) -> Option<&dyn DocumentLoader> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        self.loaders
            .iter()
            .find(|l| l.supported_extensions().contains(&ext.as_str()))
            .map(|l| &**l)
    }

    fn matching_files(&self, root: &Path) -> Result<Vec<PathBuf>, DocumentError> {
        let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
        let pattern = format!("{escaped_root}/{}", self.pattern);

        // Wildcards skip dotfiles and hidden directories such as `.git/`.
        let options = glob::MatchOptions {
            require_literal_leading_dot: true,
            ..glob::MatchOptions::new()
        };

        let mut files = Vec::new();
        for entry in glob::glob_with(&pattern, options)? {
            let path = entry.map_err(std::io::Error::from)?;
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Load `root`: a single file directly, or every matching file below a
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be read, a single-file root has no
    /// registered loader, or any matched file fails to load.
    pub async fn load_all(&self, root: &Path) -> Result<DocumentCollection, DocumentError> {
        let meta = tokio::fs::metadata(root).await?;

        if meta.is_file() {
            let loader = self.loader_for(root).ok_or_else(|| {
                DocumentError::UnsupportedFormat(root.display().to_string())
            })?;
            return Ok(DocumentCollection::new(loader.load(root).await?));
        }

        let mut collection = DocumentCollection::default();
        let mut skipped = 0usize;
        for path in self.matching_files(root)? {
            let Some(loader) = self.loader_for(&path) else {
                skipped += 1;
                if needs_pdf_feature(&path) {
                    tracing::warn!(
                        "skipping {}: PDF support not compiled in, rebuild with `--features pdf`",
                        path.display()
                    );
                } else {
                    tracing::debug!("skipping {} (no loader for extension)", path.display());
                }
                continue;
            };
            let documents = loader.load(&path).await?;
            tracing::debug!("loaded {} documents from {}", documents.len(), path.display());
            collection.extend(documents);
        }
        if skipped > 0 {
            tracing::info!(skipped, "files without a registered loader were skipped");
        }
        Ok(collection)
    }
}

/// A `.pdf` that only a `pdf`-feature build can read.
fn needs_pdf_feature(path: &Path) -> bool {
    cfg!(not(feature = "pdf"))
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

impl Default for DirectoryLoader {
    fn default() -> Self {
        Self::with_defaults("**/*", DEFAULT_MAX_FILE_SIZE)
    }
}
