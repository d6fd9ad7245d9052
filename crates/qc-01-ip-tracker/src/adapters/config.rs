use crate::domain::IpTrackerConfig;
use crate::ports::ConfigProvider;

// ============================================================================
// StaticConfigProvider - Hardcoded config for testing/development
// ============================================================================

/// Static configuration provider.
///
/// Useful for testing and development. For production, use `TomlConfigProvider`.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigProvider {
    config: IpTrackerConfig,
}

impl StaticConfigProvider {
    /// Create with the default tracker config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with the given tracker config.
    #[must_use]
    pub fn with_config(mut self, config: IpTrackerConfig) -> Self {
        self.config = config;
        self
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn get_ip_tracker_config(&self) -> IpTrackerConfig {
        self.config.clone()
    }
}

// ============================================================================
// TomlConfigProvider - Config file loading (requires "config" feature)
// ============================================================================

#[cfg(feature = "config")]
mod toml_config {
    use super::*;
    use serde::Deserialize;
    use std::fs;
    use std::path::Path;
    use thiserror::Error;

    /// Configuration file structure.
    #[derive(Debug, Deserialize)]
    struct ConfigFile {
        #[serde(default)]
        ip_tracker: IpTrackerConfig,
    }

    /// TOML-based configuration provider.
    ///
    /// # Config File Format
    ///
    /// ```toml
    /// [ip_tracker]
    /// salt_size = 32
    /// min_count_estimate = 128
    /// target_false_positive_probability = 0.001
    /// max_false_positive_probability = 0.01
    /// max_ip_entries_per_validator = 2
    /// bloom_reset_interval_secs = 60
    /// ```
    ///
    /// Missing fields take their defaults.
    #[derive(Debug, Clone)]
    pub struct TomlConfigProvider {
        config: IpTrackerConfig,
    }

    impl TomlConfigProvider {
        /// Load configuration from a TOML file.
        ///
        /// # Errors
        ///
        /// Returns error if the file cannot be read, parsed or validated.
        pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
            let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
                path: path.as_ref().display().to_string(),
                error: e.to_string(),
            })?;

            Self::parse(&content)
        }

        /// Parse configuration from a TOML string.
        pub fn parse(content: &str) -> Result<Self, ConfigError> {
            let file: ConfigFile =
                toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
            file.ip_tracker
                .validate()
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
            Ok(Self {
                config: file.ip_tracker,
            })
        }
    }

    impl ConfigProvider for TomlConfigProvider {
        fn get_ip_tracker_config(&self) -> IpTrackerConfig {
            self.config.clone()
        }
    }

    /// Errors that can occur during config loading.
    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    pub enum ConfigError {
        /// File I/O error.
        #[error("failed to read config file {path}: {error}")]
        Io {
            /// Path of the file that failed to load.
            path: String,
            /// Error message from the I/O operation.
            error: String,
        },
        /// TOML parse error.
        #[error("failed to parse config: {0}")]
        Parse(String),
        /// Parsed values failed validation.
        #[error("invalid config: {0}")]
        Invalid(String),
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_full_table() {
            let provider = TomlConfigProvider::parse(
                r#"
                [ip_tracker]
                salt_size = 16
                min_count_estimate = 256
                target_false_positive_probability = 0.002
                max_false_positive_probability = 0.02
                max_ip_entries_per_validator = 3
                bloom_reset_interval_secs = 30
                "#,
            )
            .unwrap();

            let config = provider.get_ip_tracker_config();
            assert_eq!(config.salt_size, 16);
            assert_eq!(config.min_count_estimate, 256);
            assert_eq!(config.max_ip_entries_per_validator, 3);
            assert_eq!(config.bloom_reset_interval_secs, 30);
        }

        #[test]
        fn test_missing_fields_use_defaults() {
            let provider = TomlConfigProvider::parse("[ip_tracker]\nsalt_size = 8\n").unwrap();
            let config = provider.get_ip_tracker_config();

            assert_eq!(config.salt_size, 8);
            assert_eq!(config.min_count_estimate, 128);

            let empty = TomlConfigProvider::parse("").unwrap();
            assert_eq!(empty.get_ip_tracker_config(), IpTrackerConfig::default());
        }

        #[test]
        fn test_rejects_invalid_values() {
            let result = TomlConfigProvider::parse("[ip_tracker]\nsalt_size = 0\n");
            assert!(matches!(result, Err(ConfigError::Invalid(_))));
        }

        #[test]
        fn test_rejects_malformed_toml() {
            let result = TomlConfigProvider::parse("[ip_tracker\nsalt_size = ");
            assert!(matches!(result, Err(ConfigError::Parse(_))));
        }

        #[test]
        fn test_load_missing_file() {
            let result = TomlConfigProvider::load("/nonexistent/ip_tracker.toml");
            assert!(matches!(result, Err(ConfigError::Io { .. })));
        }
    }
}

#[cfg(feature = "config")]
pub use toml_config::{ConfigError, TomlConfigProvider};
