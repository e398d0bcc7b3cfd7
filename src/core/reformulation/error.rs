//! Reformulation Error Types

use thiserror::Error;

/// Errors that can occur while loading classifier resources.
///
/// Classification itself is total and never produces one of these.
#[derive(Debug, Error)]
pub enum ReformulationError {
    #[error("Config parse error: {0}")]
    ConfigParse(String),

    #[error("Taxonomy parse failed: {0}")]
    TaxonomyParse(String),

    #[error("Abbreviation parse failed at line {line}: {message}")]
    AbbreviationParse { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for reformulation resource loading
pub type ReformulationResult<T> = Result<T, ReformulationError>;
