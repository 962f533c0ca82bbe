//! Error types for loading definitions and documents from disk
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

use crate::error::SchemaError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

#[derive(Error, Debug)]
pub enum LoaderError {
    /// File I/O errors
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parsing errors
    #[error("Failed to parse YAML file '{path}': {source}")]
    YamlParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing errors
    #[error("Failed to parse JSON file '{path}': {source}")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Unsupported file format
    #[error("Unsupported file format for '{path}'. Expected .yaml, .yml, .json or .jsonl")]
    UnsupportedFormat { path: PathBuf },

    /// The file parsed but does not describe a valid schema
    #[error("Invalid schema definition in '{path}': {source}")]
    DefinitionError { path: PathBuf, source: SchemaError },
}

impl LoaderError {
    /// Create an I/O error with path context
    pub fn io_error(path: &Path, error: std::io::Error) -> Self {
        Self::IoError {
            path: path.to_path_buf(),
            source: error,
        }
    }

    /// Create a YAML parsing error with path context
    pub fn yaml_parse_error(path: &Path, error: serde_yaml::Error) -> Self {
        Self::YamlParseError {
            path: path.to_path_buf(),
            source: error,
        }
    }

    /// Create a JSON parsing error with path context
    pub fn json_parse_error(path: &Path, error: serde_json::Error) -> Self {
        Self::JsonParseError {
            path: path.to_path_buf(),
            source: error,
        }
    }

    pub fn unsupported_format(path: &Path) -> Self {
        Self::UnsupportedFormat {
            path: path.to_path_buf(),
        }
    }

    pub fn definition_error(path: &Path, error: SchemaError) -> Self {
        Self::DefinitionError {
            path: path.to_path_buf(),
            source: error,
        }
    }

    /// Get the path associated with this error
    pub fn path(&self) -> &Path {
        match self {
            Self::IoError { path, .. }
            | Self::YamlParseError { path, .. }
            | Self::JsonParseError { path, .. }
            | Self::UnsupportedFormat { path }
            | Self::DefinitionError { path, .. } => path,
        }
    }

    /// Whether the file could not be read or parsed at all
    pub fn is_parse_error(&self) -> bool {
        !matches!(self, Self::DefinitionError { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let path = Path::new("schema.yaml");

        let io_err = LoaderError::io_error(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "File not found"),
        );
        assert!(matches!(io_err, LoaderError::IoError { .. }));
        assert_eq!(io_err.path(), path);
        assert!(io_err.is_parse_error());

        let definition_err =
            LoaderError::definition_error(path, SchemaError::invalid_definition("$", "missing `type`"));
        assert!(!definition_err.is_parse_error());
        assert!(definition_err.to_string().contains("missing `type`"));
    }

    #[test]
    fn test_yaml_error_message() {
        let err = LoaderError::yaml_parse_error(
            Path::new("doc.yaml"),
            serde_yaml::from_str::<serde_yaml::Value>("{").unwrap_err(),
        );
        assert!(err.to_string().starts_with("Failed to parse YAML file 'doc.yaml'"));
    }
}
