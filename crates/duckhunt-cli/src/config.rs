//! Configuration management for the CLI
//!
//! Settings come from, in increasing precedence:
//! - Default values
//! - A configuration file (YAML/JSON), given explicitly or found in a
//!   default location
//! - Command-line arguments
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use duckhunt_schemas::BatchConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Batch validation defaults
    pub validation: ValidationConfig,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format (human, json, json-pretty, yaml)
    pub format: String,

    /// Use colored output by default
    pub color: bool,

    /// Show a progress bar while validating many documents
    pub progress: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when neither `-v` nor `RUST_LOG` is given
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,
}

/// Validation defaults, overridden by `--fail-fast` and `--max-failures`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Stop at the first invalid document
    pub fail_fast: bool,

    /// Stop after this many invalid documents (0 = unlimited)
    pub max_failures: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            color: true,
            progress: true,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config = if is_yaml(path) {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "ignoring unreadable configuration");
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        match file {
            Some(path) if !path.exists() => Err(Error::FileNotFound {
                path: path.to_path_buf(),
            }),
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".duckhunt.yaml"),
            PathBuf::from(".duckhunt.yml"),
            PathBuf::from(".duckhunt.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let duckhunt_dir = config_dir.join("duckhunt");
            paths.push(duckhunt_dir.join("config.yaml"));
            paths.push(duckhunt_dir.join("config.json"));
        }

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".duckhunt.yaml"));
            paths.push(home_dir.join(".duckhunt.json"));
        }

        paths
    }

    /// The output format, preferring the command line over the file
    pub fn output_format(&self, cli: Option<OutputFormat>) -> Result<OutputFormat> {
        match cli {
            Some(format) => Ok(format),
            None => OutputFormat::from_name(&self.output.format).ok_or_else(|| {
                Error::config(format!("unknown output format `{}`", self.output.format))
            }),
        }
    }

    /// Batch settings, with command-line flags taking precedence
    pub fn batch_config(&self, fail_fast: bool, max_failures: Option<usize>) -> BatchConfig {
        BatchConfig {
            fail_fast: fail_fast || self.validation.fail_fast,
            max_failures: max_failures.unwrap_or(self.validation.max_failures),
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml" | "yml")
    )
}
