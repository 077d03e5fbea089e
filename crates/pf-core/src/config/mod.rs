//! Validator settings file.
//!
//! Plain `key = value` lines with `#` comments:
//!
//! ```text
//! # pf-credcheck settings
//! min_password_length = 10
//! output = json
//! log_level = debug
//! ```

pub mod parser;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::credentials::password::{PasswordPolicy, DEFAULT_MIN_LENGTH};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Unknown setting '{key}' on line {line}")]
    UnknownKey { key: String, line: usize },
    #[error("Invalid value '{value}' for '{key}' on line {line}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        line: usize,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'text' or 'json', got '{}'", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    pub min_password_length: usize,
    pub output: OutputFormat,
    /// Filter directive used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            min_password_length: DEFAULT_MIN_LENGTH,
            output: OutputFormat::Text,
            log_level: "info".to_string(),
        }
    }
}

impl ValidatorConfig {
    pub fn password_policy(&self) -> PasswordPolicy {
        PasswordPolicy::new(self.min_password_length)
    }

    /// Parse settings text on top of the defaults. Later lines win.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let settings = parser::parse_settings(input).map_err(ConfigError::Parse)?;
        let mut config = Self::default();

        for setting in settings {
            let invalid = |reason: String| ConfigError::InvalidValue {
                key: setting.key.clone(),
                value: setting.value.clone(),
                line: setting.line,
                reason,
            };
            match setting.key.as_str() {
                "min_password_length" => {
                    let n: usize = setting
                        .value
                        .parse()
                        .map_err(|e: std::num::ParseIntError| invalid(e.to_string()))?;
                    if n == 0 {
                        return Err(invalid("must be at least 1".to_string()));
                    }
                    config.min_password_length = n;
                }
                "output" => {
                    config.output = setting.value.parse().map_err(invalid)?;
                }
                "log_level" => {
                    if setting.value.is_empty() {
                        return Err(invalid("must not be empty".to_string()));
                    }
                    config.log_level = setting.value.clone();
                }
                _ => {
                    return Err(ConfigError::UnknownKey {
                        key: setting.key.clone(),
                        line: setting.line,
                    })
                }
            }
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::parse(&content)?;
        debug!("Loaded validator config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}
