//! Parsing of YAML and JSON files into values
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML (.yaml, .yml); a file may hold several `---` separated documents
    Yaml,
    /// JSON (.json)
    Json,
    /// One JSON document per line (.jsonl, .ndjson)
    JsonLines,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            Some("jsonl" | "ndjson") => Ok(Format::JsonLines),
            _ => Err(LoaderError::unsupported_format(path)),
        }
    }

    /// Get file extensions for this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Format::Yaml => &["yaml", "yml"],
            Format::Json => &["json"],
            Format::JsonLines => &["jsonl", "ndjson"],
        }
    }

    /// Get the primary file extension for this format
    pub fn primary_extension(&self) -> &'static str {
        self.extensions()[0]
    }
}

/// Parses files and strings into `serde_json::Value`s
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentParser;

impl DocumentParser {
    pub fn new() -> Self {
        Self
    }

    /// Read a file holding exactly one document
    pub fn parse_file(&self, path: &Path) -> LoaderResult<Value> {
        let format = Format::from_path(path)?;
        let content = read(path)?;
        self.parse_content(&content, format, path)
    }

    /// Read every document in a file
    pub fn parse_file_documents(&self, path: &Path) -> LoaderResult<Vec<Value>> {
        let format = Format::from_path(path)?;
        let content = read(path)?;
        self.parse_documents(&content, format, path)
    }

    /// Parse content holding exactly one document
    pub fn parse_content(&self, content: &str, format: Format, path: &Path) -> LoaderResult<Value> {
        match format {
            Format::Yaml => self.parse_yaml(content, path),
            Format::Json | Format::JsonLines => self.parse_json(content, path),
        }
    }

    /// Parse content that may hold several documents
    pub fn parse_documents(
        &self,
        content: &str,
        format: Format,
        path: &Path,
    ) -> LoaderResult<Vec<Value>> {
        match format {
            Format::Json => Ok(vec![self.parse_json(content, path)?]),
            Format::JsonLines => content
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(|line| self.parse_json(line, path))
                .collect(),
            Format::Yaml => serde_yaml::Deserializer::from_str(content)
                .map(|document| {
                    let yaml = serde_yaml::Value::deserialize(document)
                        .map_err(|e| LoaderError::yaml_parse_error(path, e))?;
                    yaml_to_json(yaml, path)
                })
                .collect(),
        }
    }

    /// Parse YAML content
    pub fn parse_yaml(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        let yaml_value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| LoaderError::yaml_parse_error(path, e))?;
        yaml_to_json(yaml_value, path)
    }

    /// Parse JSON content
    pub fn parse_json(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        serde_json::from_str(content).map_err(|e| LoaderError::json_parse_error(path, e))
    }
}

fn read(path: &Path) -> LoaderResult<String> {
    std::fs::read_to_string(path).map_err(|e| LoaderError::io_error(path, e))
}

// YAML mappings may use non-string keys, which JSON objects cannot hold
fn yaml_to_json(value: serde_yaml::Value, path: &Path) -> LoaderResult<Value> {
    serde_json::to_value(value).map_err(|e| LoaderError::json_parse_error(path, e))
}
