use std::str::FromStr;

use super::Config;

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    if let Ok(value) = raw.parse::<T>() {
        Some(value)
    } else {
        tracing::warn!("ignoring invalid {key} value: {raw}");
        None
    }
}

impl Config {
    pub(crate) fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_thresholds();
        self.apply_env_overrides_report();

        if let Ok(v) = std::env::var("DOCSIEVE_LOADER_GLOB") {
            self.loader.glob = v;
        }
        if let Some(bytes) = env_parse("DOCSIEVE_LOADER_MAX_FILE_SIZE") {
            self.loader.max_file_size = bytes;
        }
    }

    fn apply_env_overrides_thresholds(&mut self) {
        let t = &mut self.thresholds;
        if let Some(ratio) = env_parse("DOCSIEVE_NON_ASCII_RATIO") {
            t.non_ascii_ratio = ratio;
        }
        if let Some(n) = env_parse("DOCSIEVE_SHORT_CHUNK_CHARS") {
            t.short_chunk_chars = n;
        }
        if let Some(n) = env_parse("DOCSIEVE_LONG_CHUNK_CHARS") {
            t.long_chunk_chars = n;
        }
        if let Some(n) = env_parse("DOCSIEVE_NEAR_EMPTY_CHARS") {
            t.near_empty_chars = n;
        }
        if let Some(n) = env_parse("DOCSIEVE_DUPLICATE_MIN_REPEATS") {
            t.duplicate_min_repeats = n;
        }
        if let Some(bits) = env_parse("DOCSIEVE_LOW_ENTROPY_BITS") {
            t.low_entropy_bits = bits;
        }
        if let Some(n) = env_parse("DOCSIEVE_HIGH_NEWLINE_COUNT") {
            t.high_newline_count = n;
        }
        if let Some(density) = env_parse("DOCSIEVE_LOW_PUNCTUATION_DENSITY") {
            t.low_punctuation_density = density;
        }
        if let Some(n) = env_parse("DOCSIEVE_PUNCTUATION_MIN_LENGTH") {
            t.punctuation_min_length = n;
        }
    }

    fn apply_env_overrides_report(&mut self) {
        if let Some(format) = env_parse("DOCSIEVE_REPORT_FORMAT") {
            self.report.format = format;
        }
        if let Some(n) = env_parse("DOCSIEVE_EXAMPLE_LIMIT") {
            self.report.example_limit = n;
        }
        if let Some(n) = env_parse("DOCSIEVE_DUPLICATE_LIMIT") {
            self.report.duplicate_limit = n;
        }
        if let Some(n) = env_parse("DOCSIEVE_PREVIEW_CHARS") {
            self.report.preview_chars = n;
        }
    }
}
