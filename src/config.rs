//! Engine configuration.
//!
//! Loaded from TOML; every key is optional and falls back to its default.
//!
//! ```toml
//! max_text_length = 65535
//! max_record_size = 8164
//! heap_capacity = 100000
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::datum::MAX_TEXT_LENGTH;

/// Default upper bound for one encoded record (one 8KB page minus page
/// header and slot entry).
pub const DEFAULT_MAX_RECORD_SIZE: usize = 8192 - 24 - 4;

/// Errors from loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration text is not valid TOML for [`EngineConfig`].
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is syntactically valid but unusable.
    #[error("invalid config value for `{key}`: {reason}")]
    Invalid {
        /// Offending key.
        key: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Root engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Maximum byte length of a value stored in a TEXT field.
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,

    /// Maximum encoded size of one record.
    #[serde(default = "default_max_record_size")]
    pub max_record_size: usize,

    /// Maximum number of live records per table (unbounded if absent).
    #[serde(default)]
    pub heap_capacity: Option<usize>,
}

fn default_max_text_length() -> usize {
    MAX_TEXT_LENGTH
}

fn default_max_record_size() -> usize {
    DEFAULT_MAX_RECORD_SIZE
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_text_length: default_max_text_length(),
            max_record_size: default_max_record_size(),
            heap_capacity: None,
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.as_ref().display(), ?config, "loaded engine config");
        Ok(config)
    }

    /// Sets the per-table record capacity.
    pub fn with_heap_capacity(mut self, capacity: usize) -> Self {
        self.heap_capacity = Some(capacity);
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_record_size == 0 {
            return Err(ConfigError::Invalid {
                key: "max_record_size",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.max_text_length > u32::MAX as usize {
            return Err(ConfigError::Invalid {
                key: "max_text_length",
                reason: format!("must not exceed {}", u32::MAX),
            });
        }
        Ok(())
    }
}
