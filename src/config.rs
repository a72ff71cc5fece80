//! Pipeline thresholds and feature switches.
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! latin_skip_ratio = 0.1
//!
//! [digits]
//! scope = "line"
//!
//! [word_order]
//! enabled = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which span's script ratio decides whether digits are rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitScope {
    #[default]
    Document,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigitConfig {
    pub enabled: bool,
    /// Ratio strictly above which Latin digits become Arabic-indic.
    pub threshold: f64,
    pub scope: DigitScope,
}

impl Default for DigitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 0.5,
            scope: DigitScope::Document,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordOrderConfig {
    pub enabled: bool,
    /// Document ratio strictly above which the stage runs at all.
    pub document_ratio: f64,
    /// Per-line Arabic share strictly above which a line is examined.
    pub line_share: f64,
}

impl Default for WordOrderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            document_ratio: 0.6,
            line_share: 0.8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Below this ratio a page takes the Latin-dominant path.
    pub latin_skip_ratio: f64,
    /// Ratio strictly above which the cleaner uses the Arabic spacing tiers.
    pub arabic_spacing_ratio: f64,
    pub digits: DigitConfig,
    pub word_order: WordOrderConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            latin_skip_ratio: 0.1,
            arabic_spacing_ratio: 0.5,
            digits: DigitConfig::default(),
            word_order: WordOrderConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ratios = [
            ("latin_skip_ratio", self.latin_skip_ratio),
            ("arabic_spacing_ratio", self.arabic_spacing_ratio),
            ("digits.threshold", self.digits.threshold),
            ("word_order.document_ratio", self.word_order.document_ratio),
            ("word_order.line_share", self.word_order.line_share),
        ];
        for (key, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange { key, value });
            }
        }
        Ok(())
    }
}
