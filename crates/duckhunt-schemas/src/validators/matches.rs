//! `matches`: regular expression search over string values
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

use super::Validator;
use crate::error::{SchemaError, SchemaResult};
use crate::value::kind_name;
use regex::Regex;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct Matches {
    regex: Regex,
}

impl Matches {
    /// Compile a pattern
    pub fn new(pattern: &str) -> SchemaResult<Self> {
        let regex = Regex::new(pattern).map_err(|e| SchemaError::InvalidRegex {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { regex })
    }

    /// Wrap an already compiled expression
    pub fn from_regex(regex: Regex) -> Self {
        Self { regex }
    }

    /// Build from an option value, which must be a pattern string
    pub fn from_config(config: &Value) -> SchemaResult<Self> {
        match config {
            Value::String(pattern) => Self::new(pattern),
            other => Err(SchemaError::TypeMismatch {
                expected: "a regular expression pattern".to_string(),
                found: kind_name(other).to_string(),
            }),
        }
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl From<Regex> for Matches {
    fn from(regex: Regex) -> Self {
        Self::from_regex(regex)
    }
}

impl Validator for Matches {
    fn name(&self) -> &str {
        "matches"
    }

    fn valid(&self, value: &Value) -> SchemaResult<bool> {
        match value {
            Value::String(s) => Ok(self.regex.is_match(s)),
            other => Err(SchemaError::incompatible(self.name(), kind_name(other))),
        }
    }

    fn error_message(&self) -> &str {
        "No matches for Regexp"
    }
}
