//! Per-document text metrics.
//!
//! Every function here is total over any `&str`, empty included. Lengths and
//! ratios count Unicode scalar values, not bytes.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

static LIGATURE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\x{FB01}\x{FB02}]").unwrap());
static REPLACEMENT_CHAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\x{FFFD}").unwrap());
static HYPHEN_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-\n").unwrap());

#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Shannon entropy of the character distribution, in bits.
///
/// Characters are visited in code point order so the floating point sum is
/// identical across runs.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn shannon_entropy(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }

    let mut freq: BTreeMap<char, usize> = BTreeMap::new();
    let mut total = 0usize;
    for c in text.chars() {
        *freq.entry(c).or_insert(0) += 1;
        total += 1;
    }

    let total = total as f64;
    freq.values().fold(0.0, |acc, &count| {
        let p = count as f64 / total;
        acc - p * p.log2()
    })
}

/// True when the share of characters above U+007F strictly exceeds
/// `threshold_ratio`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn is_non_ascii_heavy(text: &str, threshold_ratio: f64) -> bool {
    let mut total = 0usize;
    let mut non_ascii = 0usize;
    for c in text.chars() {
        total += 1;
        if !c.is_ascii() {
            non_ascii += 1;
        }
    }
    if total == 0 {
        return false;
    }
    (non_ascii as f64 / total as f64) > threshold_ratio
}

/// Ratio of ASCII punctuation characters to total length.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn punctuation_density(text: &str) -> f64 {
    let mut total = 0usize;
    let mut punct = 0usize;
    for c in text.chars() {
        total += 1;
        if c.is_ascii_punctuation() {
            punct += 1;
        }
    }
    if total == 0 {
        return 0.0;
    }
    punct as f64 / total as f64
}

#[must_use]
pub fn newline_count(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}

/// Presence of the `ﬁ` / `ﬂ` ligature code points.
#[must_use]
pub fn has_ligature(text: &str) -> bool {
    LIGATURE_RE.is_match(text)
}

/// Presence of U+FFFD, left behind by lossy decoding.
#[must_use]
pub fn has_replacement_char(text: &str) -> bool {
    REPLACEMENT_CHAR_RE.is_match(text)
}

/// Presence of a hyphen immediately followed by a newline, i.e. a word broken
/// across source lines.
#[must_use]
pub fn has_hyphen_break(text: &str) -> bool {
    HYPHEN_BREAK_RE.is_match(text)
}

/// All per-document metrics the validator needs, computed once per document.
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(clippy::struct_excessive_bools)]
pub struct TextMetrics {
    pub length: usize,
    pub entropy: f64,
    pub newlines: usize,
    pub punctuation_density: f64,
    pub ligature: bool,
    pub replacement_char: bool,
    pub hyphen_break: bool,
    pub non_ascii_heavy: bool,
}

impl TextMetrics {
    #[must_use]
    pub fn compute(text: &str, non_ascii_ratio: f64) -> Self {
        Self {
            length: char_len(text),
            entropy: shannon_entropy(text),
            newlines: newline_count(text),
            punctuation_density: punctuation_density(text),
            ligature: has_ligature(text),
            replacement_char: has_replacement_char(text),
            hyphen_break: has_hyphen_break(text),
            non_ascii_heavy: is_non_ascii_heavy(text, non_ascii_ratio),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entropy_empty_is_zero() {
        assert!(shannon_entropy("").abs() < f64::EPSILON);
    }

    #[test]
    fn entropy_single_symbol_is_exactly_zero() {
        let h = shannon_entropy("aaaaaaaa");
        assert_eq!(h.to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn entropy_two_equal_symbols_is_one_bit() {
        assert!((shannon_entropy("abab") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn entropy_four_equal_symbols_is_two_bits() {
        assert!((shannon_entropy("abcdabcd") - 2.0).abs() < 1e-12);
    }

    #[test]
    fn entropy_counts_chars_not_bytes() {
        // two distinct scalar values, each multi-byte
        assert!((shannon_entropy("éü") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn non_ascii_heavy_empty_never_flagged() {
        assert!(!is_non_ascii_heavy("", 0.0));
        assert!(!is_non_ascii_heavy("", -1.0));
    }

    #[test]
    fn non_ascii_heavy_respects_threshold() {
        let text = "caf\u{e9} na\u{ef}ve";
        assert!(is_non_ascii_heavy(text, 0.05));
        assert!(!is_non_ascii_heavy(text, 0.5));
    }

    #[test]
    fn non_ascii_heavy_is_strictly_greater() {
        // 1 of 20 = 0.05 exactly
        let text = format!("\u{e9}{}", "a".repeat(19));
        assert!(!is_non_ascii_heavy(&text, 0.05));
    }

    #[test]
    fn ascii_text_not_heavy() {
        assert!(!is_non_ascii_heavy("plain ascii text", 0.0));
    }

    #[test]
    fn punctuation_density_empty_is_zero() {
        assert!(punctuation_density("").abs() < f64::EPSILON);
    }

    #[test]
    fn punctuation_density_counts_ascii_set() {
        assert!((punctuation_density("a,b.") - 0.5).abs() < 1e-12);
        assert!((punctuation_density("!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn punctuation_density_ignores_unicode_punctuation() {
        assert!(punctuation_density("\u{201c}quoted\u{201d}").abs() < f64::EPSILON);
    }

    #[test]
    fn newline_count_literal() {
        assert_eq!(newline_count("a\nb\nc"), 2);
        assert_eq!(newline_count(""), 0);
        assert_eq!(newline_count("\r\n\r\n"), 2);
    }

    #[test]
    fn ligature_detected() {
        assert!(has_ligature("e\u{FB03}cient \u{FB01}le"));
        assert!(has_ligature("\u{FB02}ow"));
        assert!(!has_ligature("file flow"));
        // ffi ligature alone is not in the set
        assert!(!has_ligature("e\u{FB03}cient"));
    }

    #[test]
    fn replacement_char_detected() {
        assert!(has_replacement_char("bad \u{FFFD} byte"));
        assert!(!has_replacement_char("fine"));
    }

    #[test]
    fn hyphen_break_detected() {
        assert!(has_hyphen_break("extrac-\ntion"));
        assert!(!has_hyphen_break("well-known\nword"));
        assert!(!has_hyphen_break("dash -"));
    }

    #[test]
    fn compute_collects_everything() {
        let m = TextMetrics::compute("hy-\nphen \u{FFFD}", 0.05);
        assert_eq!(m.length, 10);
        assert_eq!(m.newlines, 1);
        assert!(m.hyphen_break);
        assert!(m.replacement_char);
        assert!(!m.ligature);
        assert!(m.non_ascii_heavy);
    }

    #[test]
    fn compute_on_empty_is_neutral() {
        let m = TextMetrics::compute("", 0.05);
        assert_eq!(m.length, 0);
        assert_eq!(m.newlines, 0);
        assert!(m.entropy.abs() < f64::EPSILON);
        assert!(m.punctuation_density.abs() < f64::EPSILON);
        assert!(!m.ligature && !m.replacement_char && !m.hyphen_break && !m.non_ascii_heavy);
    }

    mod proptest_metrics {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn entropy_never_negative(text in "\\PC{0,2000}") {
                let h = shannon_entropy(&text);
                prop_assert!(h >= 0.0);
                prop_assert!(h.is_finite());
            }

            #[test]
            fn entropy_zero_for_single_symbol(c in proptest::char::any(), n in 1usize..500) {
                let text: String = std::iter::repeat_n(c, n).collect();
                prop_assert_eq!(shannon_entropy(&text).to_bits(), 0.0f64.to_bits());
            }

            #[test]
            fn entropy_bounded_by_alphabet(text in "[a-h]{1,500}") {
                // at most 8 symbols -> at most 3 bits
                prop_assert!(shannon_entropy(&text) <= 3.0 + 1e-9);
            }

            #[test]
            fn punctuation_density_in_unit_interval(text in "\\PC{0,2000}") {
                let d = punctuation_density(&text);
                prop_assert!((0.0..=1.0).contains(&d));
            }

            #[test]
            fn newline_count_matches_split(text in "[a-z\\n]{0,300}") {
                prop_assert_eq!(newline_count(&text), text.split('\n').count() - 1);
            }

            #[test]
            fn ascii_only_never_heavy(text in "[ -~]{0,300}", ratio in 0.0f64..1.0) {
                prop_assert!(!is_non_ascii_heavy(&text, ratio));
            }
        }
    }
}
