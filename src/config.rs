use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::reformulation::ClassifierConfig;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub classifier: ClassifierConfig,
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON records on stderr instead of human-readable lines.
    pub json: bool,
    /// Also append JSON records to this file.
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            log_file: None,
        }
    }
}

/// Where a loaded [`AppConfig`] came from.
///
/// Loading happens before logging is installed, so the outcome is returned
/// and reported with [`ConfigSource::log`] afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read and validated from this file.
    File(PathBuf),
    /// No file at this path.
    Missing(PathBuf),
    /// The file exists but was rejected.
    Rejected { path: PathBuf, reason: String },
}

impl ConfigSource {
    /// True when defaults are in use.
    pub fn is_fallback(&self) -> bool {
        !matches!(self, Self::File(_))
    }

    pub fn log(&self) {
        match self {
            Self::File(path) => log::info!("Loaded config from {}", path.display()),
            Self::Missing(path) => {
                log::debug!("No config file at {}; using defaults", path.display())
            }
            Self::Rejected { path, reason } => {
                log::warn!("Ignoring config at {}: {reason}; using defaults", path.display())
            }
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/qreftag/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> (Self, ConfigSource) {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &Path) -> (Self, ConfigSource) {
        let path = config_path.to_path_buf();
        let contents = match std::fs::read_to_string(config_path) {
            Ok(contents) => contents,
            Err(_) => return (Self::default(), ConfigSource::Missing(path)),
        };

        let parsed = toml::from_str::<Self>(&contents)
            .map_err(|e| format!("parse error: {e}"))
            .and_then(|config| {
                config
                    .classifier
                    .validate()
                    .map(|()| config)
                    .map_err(|e| e.to_string())
            });

        match parsed {
            Ok(config) => (config, ConfigSource::File(path)),
            Err(reason) => (Self::default(), ConfigSource::Rejected { path, reason }),
        }
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("qreftag").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert!(config.logging.log_file.is_none());
        assert_eq!(config.classifier.max_spelling_distance, 2);
    }

    #[test]
    fn test_config_load_missing_file() {
        // Should return defaults without panicking
        let path = Path::new("/nonexistent/qreftag/config.toml");
        let (config, source) = AppConfig::load_from(path);
        assert_eq!(config.classifier.substitution_threshold, 0.2);
        assert_eq!(source, ConfigSource::Missing(path.to_path_buf()));
        assert!(source.is_fallback());
    }

    #[test]
    fn test_config_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[logging]
level = "debug"

[classifier]
max_spelling_distance = 1

[classifier.similarity]
expansion_budget = 2000
"#
        )
        .unwrap();

        let (config, source) = AppConfig::load_from(file.path());
        assert_eq!(source, ConfigSource::File(file.path().to_path_buf()));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.classifier.max_spelling_distance, 1);
        assert_eq!(config.classifier.similarity.expansion_budget, 2000);
        assert_eq!(config.classifier.substitution_threshold, 0.2);
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[classifier]\nsubstitution_threshold = 1.5").unwrap();

        let (config, source) = AppConfig::load_from(file.path());
        assert_eq!(config.classifier.substitution_threshold, 0.2);
        match source {
            ConfigSource::Rejected { path, reason } => {
                assert_eq!(path.as_path(), file.path());
                assert!(reason.contains("substitution_threshold"), "reason: {reason}");
            }
            other => panic!("expected rejected config, got {other:?}"),
        }
    }

    #[test]
    fn test_unparseable_config_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[classifier\nthreshold =").unwrap();

        let (config, source) = AppConfig::load_from(file.path());
        assert_eq!(config.logging.level, "info");
        assert!(matches!(source, ConfigSource::Rejected { .. }));
        assert!(source.is_fallback());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = AppConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.logging.level, config.logging.level);
        assert_eq!(
            deserialized.classifier.similarity.expansion_budget,
            config.classifier.similarity.expansion_budget
        );
    }
}
