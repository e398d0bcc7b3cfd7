//! Classifier Configuration
//!
//! Configuration structures for the detector cascade and the lexical
//! similarity engine, with defaults matching the reference tagger.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::error::{ReformulationError, ReformulationResult};

/// Overall classifier configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Similarity engine configuration
    #[serde(default)]
    pub similarity: SimilarityConfig,

    /// Minimum word relatedness for a word substitution (default: 0.2)
    #[serde(default = "default_substitution_threshold")]
    pub substitution_threshold: f64,

    /// Maximum edit distance still counted as a spelling correction (default: 2)
    #[serde(default = "default_max_spelling_distance")]
    pub max_spelling_distance: usize,

    /// Path to a TOML taxonomy used as the lexical database
    #[serde(default)]
    pub taxonomy_path: Option<PathBuf>,

    /// Path to an abbreviation table (`abbr - expansion, expansion` lines)
    #[serde(default)]
    pub abbreviations_path: Option<PathBuf>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            similarity: SimilarityConfig::default(),
            substitution_threshold: 0.2,
            max_spelling_distance: 2,
            taxonomy_path: None,
            abbreviations_path: None,
        }
    }
}

impl ClassifierConfig {
    /// Load configuration from TOML file
    pub fn from_toml_file(path: &std::path::Path) -> ReformulationResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load from TOML string
    pub fn from_toml_str(content: &str) -> ReformulationResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the cascade cannot work with.
    pub fn validate(&self) -> ReformulationResult<()> {
        if !(0.0..=1.0).contains(&self.substitution_threshold) {
            return Err(ReformulationError::ConfigParse(format!(
                "substitution_threshold must be within [0, 1], got {}",
                self.substitution_threshold
            )));
        }
        if self.similarity.expansion_budget == 0 {
            return Err(ReformulationError::ConfigParse(
                "similarity.expansion_budget must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Lexical similarity engine configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimilarityConfig {
    /// Recursive expansions allowed per top-level alignment query
    #[serde(default = "default_expansion_budget")]
    pub expansion_budget: usize,

    /// Capacity of the word → synsets table
    #[serde(default = "default_synset_capacity")]
    pub synset_cache_capacity: usize,

    /// Capacity of the synset pair → relatedness table
    #[serde(default = "default_pair_capacity")]
    pub sense_cache_capacity: usize,

    /// Capacity of the word pair → best relatedness table
    #[serde(default = "default_pair_capacity")]
    pub word_cache_capacity: usize,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            expansion_budget: 10_000,
            synset_cache_capacity: 4096,
            sense_cache_capacity: 16_384,
            word_cache_capacity: 16_384,
        }
    }
}

// Default value helpers for serde
fn default_substitution_threshold() -> f64 { 0.2 }
fn default_max_spelling_distance() -> usize { 2 }
fn default_expansion_budget() -> usize { 10_000 }
fn default_synset_capacity() -> usize { 4096 }
fn default_pair_capacity() -> usize { 16_384 }
