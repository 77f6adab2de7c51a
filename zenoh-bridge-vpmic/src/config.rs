//! Configuration for the vpmic bridge.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use zenmon_common::config::{LoggingConfig, ZenohConfig};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] json5::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Complete bridge configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VpmicBridgeConfig {
    /// Zenoh connection settings.
    #[serde(default)]
    pub zenoh: ZenohConfig,

    /// Instrument identity settings.
    #[serde(default)]
    pub instrument: InstrumentConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Instrument identity configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentConfig {
    /// Key expression prefix (default: "zenmon/vpmic").
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// Instrument name, the second-to-last key segment (default:
    /// "vpmic0").
    #[serde(default = "default_name")]
    pub name: String,
}

fn default_key_prefix() -> String {
    zenmon_common::KEY_PREFIX.to_string()
}

fn default_name() -> String {
    "vpmic0".to_string()
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self {
            key_prefix: default_key_prefix(),
            name: default_name(),
        }
    }
}

impl VpmicBridgeConfig {
    /// Load configuration from a JSON5 file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: VpmicBridgeConfig = json5::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let name = &self.instrument.name;
        if name.is_empty() {
            return Err(ConfigError::Validation(
                "instrument.name must not be empty".to_string(),
            ));
        }
        if name.contains(['/', '*', '?', '#', '$', '@']) || name.contains(char::is_whitespace) {
            return Err(ConfigError::Validation(format!(
                "instrument.name '{}' contains key expression metacharacters",
                name
            )));
        }

        let prefix = &self.instrument.key_prefix;
        if prefix.is_empty() {
            return Err(ConfigError::Validation(
                "instrument.key_prefix must not be empty".to_string(),
            ));
        }
        if prefix.contains(['*', '?', '#', '$', '@']) || prefix.contains(char::is_whitespace) {
            return Err(ConfigError::Validation(format!(
                "instrument.key_prefix '{}' contains key expression metacharacters",
                prefix
            )));
        }
        if prefix.starts_with('/') || prefix.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "instrument.key_prefix '{}' must not start or end with '/'",
                prefix
            )));
        }

        Ok(())
    }
}
