//! Runtime configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_MAX_INPUT_LEN: usize = 1024;

/// Settings for the question pipeline and its error store.
///
/// Every field is optional in the JSON form; unknown fields are rejected so
/// that typos do not silently fall back to defaults.
///
/// ```rust
/// use mathq::Config;
///
/// let config = Config::from_json(r#"{ "max_input_len": 64 }"#).unwrap();
/// assert_eq!(config.max_input_len, 64);
/// assert!(config.record_errors);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Longest accepted question, in bytes.
    pub max_input_len: usize,
    /// Whether failed questions are counted in the error store.
    pub record_errors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_input_len: DEFAULT_MAX_INPUT_LEN,
            record_errors: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()
    }

    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        tracing::debug!(target: "mathq::config", path = %path.display(), ?config, "Loaded config");
        Ok(config)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.max_input_len == 0 {
            return Err(ConfigError::Invalid(
                "max_input_len must be greater than zero".to_string(),
            ));
        }
        Ok(self)
    }
}
