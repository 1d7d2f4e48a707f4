mod env;
mod types;


pub use types::*;

use std::path::Path;

use anyhow::{Context, bail};

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            tracing::debug!("config file {} not found, using defaults", path.display());
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Reject threshold combinations that would make the checks meaningless.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending field.
    pub fn validate(&self) -> anyhow::Result<()> {
        let t = &self.thresholds;
        if !(0.0..=1.0).contains(&t.non_ascii_ratio) {
            bail!(
                "thresholds.non_ascii_ratio must be within [0, 1], got {}",
                t.non_ascii_ratio
            );
        }
        if !(0.0..=1.0).contains(&t.low_punctuation_density) {
            bail!(
                "thresholds.low_punctuation_density must be within [0, 1], got {}",
                t.low_punctuation_density
            );
        }
        if !t.low_entropy_bits.is_finite() || t.low_entropy_bits < 0.0 {
            bail!(
                "thresholds.low_entropy_bits must be a non-negative number, got {}",
                t.low_entropy_bits
            );
        }
        if t.short_chunk_chars > t.long_chunk_chars {
            bail!(
                "thresholds.short_chunk_chars ({}) exceeds thresholds.long_chunk_chars ({})",
                t.short_chunk_chars,
                t.long_chunk_chars
            );
        }

        let r = &self.report;
        if r.example_limit == 0 {
            bail!("report.example_limit must be at least 1");
        }
        if r.duplicate_limit == 0 {
            bail!("report.duplicate_limit must be at least 1");
        }
        if r.preview_chars == 0 {
            bail!("report.preview_chars must be at least 1");
        }
        Ok(())
    }
}
