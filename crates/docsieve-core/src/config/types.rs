use serde::{Deserialize, Serialize};

/// Default maximum size of a single input file: 50 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub loader: LoaderConfig,
}

fn default_non_ascii_ratio() -> f64 {
    0.05
}

fn default_short_chunk_chars() -> usize {
    50
}

fn default_long_chunk_chars() -> usize {
    8000
}

fn default_near_empty_chars() -> usize {
    5
}

fn default_duplicate_min_repeats() -> usize {
    3
}

fn default_low_entropy_bits() -> f64 {
    2.5
}

fn default_high_newline_count() -> usize {
    30
}

fn default_low_punctuation_density() -> f64 {
    0.001
}

fn default_punctuation_min_length() -> usize {
    300
}

/// Heuristic cut-offs applied by the validator. Lengths are in characters.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Thresholds {
    /// A document is non-ASCII heavy when more than this share of its
    /// characters lie above U+007F.
    #[serde(default = "default_non_ascii_ratio")]
    pub non_ascii_ratio: f64,
    /// Documents shorter than this are "very short".
    #[serde(default = "default_short_chunk_chars")]
    pub short_chunk_chars: usize,
    /// Documents longer than this are "very long".
    #[serde(default = "default_long_chunk_chars")]
    pub long_chunk_chars: usize,
    /// Documents shorter than this are empty or near-empty.
    #[serde(default = "default_near_empty_chars")]
    pub near_empty_chars: usize,
    /// Content repeated strictly more than this many times is boilerplate.
    #[serde(default = "default_duplicate_min_repeats")]
    pub duplicate_min_repeats: usize,
    /// Non-zero entropy below this many bits is flagged.
    #[serde(default = "default_low_entropy_bits")]
    pub low_entropy_bits: f64,
    /// More newlines than this is flagged.
    #[serde(default = "default_high_newline_count")]
    pub high_newline_count: usize,
    /// Punctuation density below this is flagged, for long documents only.
    #[serde(default = "default_low_punctuation_density")]
    pub low_punctuation_density: f64,
    /// Minimum length (exclusive) for the punctuation check to apply.
    #[serde(default = "default_punctuation_min_length")]
    pub punctuation_min_length: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            non_ascii_ratio: default_non_ascii_ratio(),
            short_chunk_chars: default_short_chunk_chars(),
            long_chunk_chars: default_long_chunk_chars(),
            near_empty_chars: default_near_empty_chars(),
            duplicate_min_repeats: default_duplicate_min_repeats(),
            low_entropy_bits: default_low_entropy_bits(),
            high_newline_count: default_high_newline_count(),
            low_punctuation_density: default_low_punctuation_density(),
            punctuation_min_length: default_punctuation_min_length(),
        }
    }
}

/// Output format of the rendered report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown report format: {other} (expected text or json)")),
        }
    }
}

fn default_example_limit() -> usize {
    10
}

fn default_duplicate_limit() -> usize {
    5
}

fn default_preview_chars() -> usize {
    120
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: ReportFormat,
    /// Maximum number of example indices listed per check.
    #[serde(default = "default_example_limit")]
    pub example_limit: usize,
    /// Maximum number of repeated-content groups shown.
    #[serde(default = "default_duplicate_limit")]
    pub duplicate_limit: usize,
    /// Length of the single-line preview of repeated content.
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            example_limit: default_example_limit(),
            duplicate_limit: default_duplicate_limit(),
            preview_chars: default_preview_chars(),
        }
    }
}

fn default_glob() -> String {
    "**/*".into()
}

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoaderConfig {
    /// Pattern, relative to the root directory, selecting files to load.
    #[serde(default = "default_glob")]
    pub glob: String,
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            glob: default_glob(),
            max_file_size: default_max_file_size(),
        }
    }
}
