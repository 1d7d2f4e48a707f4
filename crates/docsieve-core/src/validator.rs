//! Collection-level validation pass.
//!
//! [`Validator::validate`] computes metrics for every document once, then runs
//! each check as an independent scan over those metrics. The result is a plain
//! data structure; rendering lives in [`crate::report`].

use std::collections::HashMap;

use serde::Serialize;

use crate::config::{Config, ReportConfig, Thresholds};
use crate::document::Document;
use crate::metrics::TextMetrics;

/// Indices of documents tripping one check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Flagged {
    /// Total number of flagged documents.
    pub count: usize,
    /// The first flagged indices, capped at the example limit.
    pub examples: Vec<usize>,
}

impl Flagged {
    fn from_indices(indices: impl Iterator<Item = usize>, limit: usize) -> Self {
        let mut flagged = Self::default();
        for index in indices {
            if flagged.examples.len() < limit {
                flagged.examples.push(index);
            }
            flagged.count += 1;
        }
        flagged
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LengthStats {
    pub count: usize,
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    pub median: f64,
    pub very_short: Flagged,
    pub very_long: Flagged,
    pub near_empty: Flagged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    pub count: usize,
    /// Position of the first document carrying this content.
    pub first_index: usize,
    /// Single-line, truncated rendition of the content.
    pub preview: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DuplicateSummary {
    /// Number of distinct contents repeated more than the threshold.
    pub groups_over_threshold: usize,
    /// Most repeated groups first, capped at the duplicate limit.
    pub top: Vec<DuplicateGroup>,
}

/// Number of documents in which each artifact occurs at least once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ArtifactCounts {
    pub ligature: usize,
    pub replacement_char: usize,
    pub hyphen_break: usize,
    pub non_ascii_heavy: usize,
}

impl ArtifactCounts {
    #[must_use]
    pub fn any(&self) -> bool {
        self.ligature + self.replacement_char + self.hyphen_break + self.non_ascii_heavy > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructureSummary {
    pub high_newline: Flagged,
    pub low_punctuation: Flagged,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Cut-offs the report was computed with, echoed by the renderer.
    pub thresholds: Thresholds,
    pub lengths: LengthStats,
    pub duplicates: DuplicateSummary,
    pub entropy: Flagged,
    pub artifacts: ArtifactCounts,
    pub structure: StructureSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ValidationOutcome {
    /// The collection had no documents; nothing was computed.
    Empty,
    Completed(ValidationReport),
}

impl ValidationOutcome {
    #[must_use]
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            Self::Empty => None,
            Self::Completed(report) => Some(report),
        }
    }
}

pub struct Validator {
    thresholds: Thresholds,
    report: ReportConfig,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(Thresholds::default(), ReportConfig::default())
    }
}

impl Validator {
    #[must_use]
    pub fn new(thresholds: Thresholds, report: ReportConfig) -> Self {
        Self { thresholds, report }
    }

    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.thresholds.clone(), config.report.clone())
    }

    #[must_use]
    pub fn validate(&self, docs: &[Document]) -> ValidationOutcome {
        if docs.is_empty() {
            tracing::warn!("no documents loaded; nothing to validate");
            return ValidationOutcome::Empty;
        }

        let metrics: Vec<TextMetrics> = docs
            .iter()
            .map(|d| TextMetrics::compute(&d.content, self.thresholds.non_ascii_ratio))
            .collect();

        let report = ValidationReport {
            thresholds: self.thresholds.clone(),
            lengths: self.length_stats(&metrics),
            duplicates: self.duplicates(docs),
            entropy: self.low_entropy(&metrics),
            artifacts: artifact_counts(&metrics),
            structure: self.structure(&metrics),
        };

        tracing::info!(
            documents = docs.len(),
            duplicate_groups = report.duplicates.groups_over_threshold,
            low_entropy = report.entropy.count,
            "validation complete"
        );

        ValidationOutcome::Completed(report)
    }

    fn flag(&self, metrics: &[TextMetrics], pred: impl Fn(&TextMetrics) -> bool) -> Flagged {
        Flagged::from_indices(
            metrics
                .iter()
                .enumerate()
                .filter(|(_, m)| pred(*m))
                .map(|(i, _)| i),
            self.report.example_limit,
        )
    }

    #[allow(clippy::cast_precision_loss)]
    fn length_stats(&self, metrics: &[TextMetrics]) -> LengthStats {
        let mut sorted: Vec<usize> = metrics.iter().map(|m| m.length).collect();
        sorted.sort_unstable();

        let count = sorted.len();
        let total: usize = sorted.iter().sum();
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
        } else {
            sorted[mid] as f64
        };

        let t = &self.thresholds;
        LengthStats {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean: total as f64 / count as f64,
            median,
            very_short: self.flag(metrics, |m| m.length < t.short_chunk_chars),
            very_long: self.flag(metrics, |m| m.length > t.long_chunk_chars),
            near_empty: self.flag(metrics, |m| m.length < t.near_empty_chars),
        }
    }

    fn duplicates(&self, docs: &[Document]) -> DuplicateSummary {
        // content -> (occurrences, first index)
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (i, doc) in docs.iter().enumerate() {
            counts.entry(doc.content.as_str()).or_insert((0, i)).0 += 1;
        }

        let mut repeated: Vec<(&str, usize, usize)> = counts
            .into_iter()
            .filter(|(_, (count, _))| *count > self.thresholds.duplicate_min_repeats)
            .map(|(content, (count, first))| (content, count, first))
            .collect();
        repeated.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

        DuplicateSummary {
            groups_over_threshold: repeated.len(),
            top: repeated
                .into_iter()
                .take(self.report.duplicate_limit)
                .map(|(content, count, first_index)| DuplicateGroup {
                    count,
                    first_index,
                    preview: preview(content, self.report.preview_chars),
                })
                .collect(),
        }
    }

    fn low_entropy(&self, metrics: &[TextMetrics]) -> Flagged {
        let limit = self.thresholds.low_entropy_bits;
        self.flag(metrics, |m| m.entropy > 0.0 && m.entropy < limit)
    }

    fn structure(&self, metrics: &[TextMetrics]) -> StructureSummary {
        let t = &self.thresholds;
        StructureSummary {
            high_newline: self.flag(metrics, |m| m.newlines > t.high_newline_count),
            low_punctuation: self.flag(metrics, |m| {
                m.length > t.punctuation_min_length
                    && m.punctuation_density < t.low_punctuation_density
            }),
        }
    }
}

fn artifact_counts(metrics: &[TextMetrics]) -> ArtifactCounts {
    metrics
        .iter()
        .fold(ArtifactCounts::default(), |mut acc, m| {
            acc.ligature += usize::from(m.ligature);
            acc.replacement_char += usize::from(m.replacement_char);
            acc.hyphen_break += usize::from(m.hyphen_break);
            acc.non_ascii_heavy += usize::from(m.non_ascii_heavy);
            acc
        })
}

fn preview(content: &str, max_chars: usize) -> String {
    content
        .chars()
        .map(|c| if c == '\n' { ' ' } else { c })
        .take(max_chars)
        .collect()
}
