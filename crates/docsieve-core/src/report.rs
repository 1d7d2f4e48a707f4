//! Human-readable and JSON renditions of a [`ValidationOutcome`].

use std::fmt::Write;

use crate::config::ReportFormat;
use crate::document::DocumentCollection;
use crate::validator::{Flagged, ValidationOutcome, ValidationReport};

const BANNER: &str = "========== CLEANLINESS VALIDATION ==========";
const FOOTER: &str = "========== VALIDATION COMPLETE ==========";
const EMPTY_WARNING: &str = "[WARN] No documents loaded; nothing to validate.";

const INTERPRETATION: &[&str] = &[
    "A few warnings are normal.",
    "Many repeated chunks \u{2192} consider removing headers/footers.",
    "Low-entropy / low-punctuation / non-ASCII-heavy chunks \u{2192} watch for OCR issues.",
    "Very short/long chunks \u{2192} consider re-splitting or cleaning upstream.",
];

/// Render in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render(outcome: &ValidationOutcome, format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(render_text(outcome)),
        ReportFormat::Json => render_json(outcome),
    }
}

/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_json(outcome: &ValidationOutcome) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(outcome)?;
    out.push('\n');
    Ok(out)
}

#[must_use]
pub fn render_text(outcome: &ValidationOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{BANNER}");

    let report = match outcome {
        ValidationOutcome::Empty => {
            let _ = writeln!(out, "{EMPTY_WARNING}");
            return out;
        }
        ValidationOutcome::Completed(report) => report,
    };

    write_lengths(&mut out, report);
    write_duplicates(&mut out, report);
    write_entropy(&mut out, report);
    write_artifacts(&mut out, report);
    write_structure(&mut out, report);

    let t = &report.thresholds;
    let near_empty = &report.lengths.near_empty;
    if !near_empty.is_empty() {
        let _ = writeln!(
            out,
            "\n[WARN] {} chunks are empty or near-empty (< {} chars). Example indices: {:?}",
            near_empty.count, t.near_empty_chars, near_empty.examples
        );
    }

    let _ = writeln!(out, "\n{FOOTER}\n");
    let _ = writeln!(out, "Interpretation:");
    for line in INTERPRETATION {
        let _ = writeln!(out, "  \u{2022} {line}");
    }
    out
}

fn write_lengths(out: &mut String, report: &ValidationReport) {
    let l = &report.lengths;
    let t = &report.thresholds;
    let _ = writeln!(out, "\n[STATS] Chunk length (characters)");
    let _ = writeln!(out, "  Count : {}", l.count);
    let _ = writeln!(out, "  Min   : {}", l.min);
    let _ = writeln!(out, "  Max   : {}", l.max);
    let _ = writeln!(out, "  Avg   : {:.1}", l.mean);
    let _ = writeln!(out, "  Median: {:.1}", l.median);

    if !l.very_short.is_empty() {
        let _ = writeln!(
            out,
            "\n[WARN] {} chunks are very short (< {} chars). Example indices: {:?}",
            l.very_short.count, t.short_chunk_chars, l.very_short.examples
        );
    }
    if !l.very_long.is_empty() {
        let _ = writeln!(
            out,
            "[WARN] {} chunks are very long (> {} chars). Example indices: {:?}",
            l.very_long.count, t.long_chunk_chars, l.very_long.examples
        );
    }
}

fn write_duplicates(out: &mut String, report: &ValidationReport) {
    let d = &report.duplicates;
    let _ = writeln!(
        out,
        "\n[DUPLICATES] Checking for repeated chunks (exact duplicates)..."
    );
    if d.groups_over_threshold == 0 {
        let _ = writeln!(out, "  No highly repeated chunks found (good).");
        return;
    }

    let _ = writeln!(
        out,
        "  Found {} chunk texts that repeat > {} times.",
        d.groups_over_threshold, report.thresholds.duplicate_min_repeats
    );
    let _ = writeln!(
        out,
        "  This may indicate headers/footers or boilerplate not removed."
    );
    for (i, group) in d.top.iter().enumerate() {
        let _ = writeln!(
            out,
            "    #{} repeat_count={} preview='{}...'",
            i + 1,
            group.count,
            group.preview
        );
    }
}

fn write_entropy(out: &mut String, report: &ValidationReport) {
    let _ = writeln!(
        out,
        "\n[ENTROPY] Checking for low-entropy (possible OCR garbage) chunks..."
    );
    let e = &report.entropy;
    if e.is_empty() {
        let _ = writeln!(out, "  No obviously low-entropy chunks detected.");
    } else {
        let _ = writeln!(
            out,
            "  {} chunks have low entropy (< {}). Example indices: {:?}",
            e.count, report.thresholds.low_entropy_bits, e.examples
        );
    }
}

fn write_artifacts(out: &mut String, report: &ValidationReport) {
    let a = &report.artifacts;
    let _ = writeln!(
        out,
        "\n[CHARS] Checking for weird / non-ASCII / OCR characters..."
    );
    if a.ligature > 0 {
        let _ = writeln!(
            out,
            "  [WARN] {} chunks contain ligature characters (\u{FB01}, \u{FB02}).",
            a.ligature
        );
    }
    if a.replacement_char > 0 {
        let _ = writeln!(
            out,
            "  [WARN] {} chunks contain the replacement char '\u{FFFD}'.",
            a.replacement_char
        );
    }
    if a.hyphen_break > 0 {
        let _ = writeln!(
            out,
            "  [WARN] {} chunks contain hyphen line-break patterns ('-\\n').",
            a.hyphen_break
        );
    }
    if a.non_ascii_heavy > 0 {
        let _ = writeln!(
            out,
            "  [WARN] {} chunks have a high proportion of non-ASCII characters.",
            a.non_ascii_heavy
        );
    }
    if !a.any() {
        let _ = writeln!(out, "  No major weird-character issues detected.");
    }
}

fn write_structure(out: &mut String, report: &ValidationReport) {
    let s = &report.structure;
    let t = &report.thresholds;
    let _ = writeln!(
        out,
        "\n[STRUCTURE] Checking newline and punctuation patterns..."
    );
    if !s.high_newline.is_empty() {
        let _ = writeln!(
            out,
            "  [WARN] {} chunks have many newlines (> {}). Example indices: {:?}",
            s.high_newline.count, t.high_newline_count, s.high_newline.examples
        );
    }
    if s.low_punctuation.is_empty() {
        let _ = writeln!(out, "  Punctuation patterns look normal for most chunks.");
    } else {
        write_low_punctuation(out, &s.low_punctuation);
    }
}

fn write_low_punctuation(out: &mut String, flagged: &Flagged) {
    let _ = writeln!(
        out,
        "  [WARN] {} chunks are long but have almost no punctuation. \
         May indicate poor extraction / OCR. Example indices: {:?}",
        flagged.count, flagged.examples
    );
}

/// Print the documents at `indices` for manual inspection. Out-of-range
/// indices produce a warning line instead of failing.
#[must_use]
pub fn render_inspection(documents: &DocumentCollection, indices: &[usize]) -> String {
    let mut out = String::new();
    for &index in indices {
        match documents.get(index) {
            Some(doc) => {
                let source = if doc.metadata.source.is_empty() {
                    "<unknown>"
                } else {
                    doc.metadata.source.as_str()
                };
                let _ = writeln!(out, "\n---------- document #{index} ({source}) ----------");
                let _ = writeln!(out, "{}", doc.content);
            }
            None => {
                let _ = writeln!(
                    out,
                    "\n[WARN] document #{index} does not exist (collection has {} documents)",
                    documents.len()
                );
            }
        }
    }
    out
}
