//! `allow_blank` / `allow_empty`
//!
//! Both validators are toggles: `true` permits anything, `false` forbids
//! empty values (and, for `allow_blank`, whitespace-only strings).
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

use super::{require_config, Validator};
use crate::error::{SchemaError, SchemaResult};
use crate::value::{kind_name, length};
use serde_json::Value;

/// Code points treated as whitespace by `allow_blank`
const WHITESPACE: &[u32] = &[
    9, 10, 11, 12, 13, 32, 133, 160, 5760, 6158, 8192, 8193, 8194, 8195, 8196, 8197, 8198, 8199,
    8200, 8201, 8202, 8232, 8233, 8239, 8287, 12288,
];

fn is_whitespace(c: char) -> bool {
    WHITESPACE.contains(&(c as u32))
}

fn toggle(name: &str, config: &Value) -> SchemaResult<bool> {
    match require_config(name, config)? {
        Value::Bool(allow) => Ok(*allow),
        other => Err(SchemaError::invalid_argument(format!(
            "`{}` requires a boolean, got {}",
            name,
            kind_name(other)
        ))),
    }
}

fn is_empty(name: &str, value: &Value) -> SchemaResult<bool> {
    length(value)
        .map(|len| len == 0)
        .ok_or_else(|| SchemaError::incompatible(name, kind_name(value)))
}

#[derive(Debug, Clone, Copy)]
pub struct AllowBlank {
    allow: bool,
}

impl AllowBlank {
    pub fn new(allow: bool) -> Self {
        Self { allow }
    }

    pub fn from_config(config: &Value) -> SchemaResult<Self> {
        toggle("allow_blank", config).map(Self::new)
    }
}

impl Validator for AllowBlank {
    fn name(&self) -> &str {
        "allow_blank"
    }

    fn valid(&self, value: &Value) -> SchemaResult<bool> {
        if self.allow {
            return Ok(true);
        }
        if is_empty(self.name(), value)? {
            return Ok(false);
        }
        match value {
            Value::String(s) => Ok(!s.chars().all(is_whitespace)),
            _ => Ok(true),
        }
    }

    fn error_message(&self) -> &str {
        if self.allow {
            "blank values allowed"
        } else {
            "blank values not allowed"
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AllowEmpty {
    allow: bool,
}

impl AllowEmpty {
    pub fn new(allow: bool) -> Self {
        Self { allow }
    }

    pub fn from_config(config: &Value) -> SchemaResult<Self> {
        toggle("allow_empty", config).map(Self::new)
    }
}

impl Validator for AllowEmpty {
    fn name(&self) -> &str {
        "allow_empty"
    }

    fn valid(&self, value: &Value) -> SchemaResult<bool> {
        if self.allow {
            return Ok(true);
        }
        Ok(!is_empty(self.name(), value)?)
    }

    fn error_message(&self) -> &str {
        if self.allow {
            "empty values allowed"
        } else {
            "empty values not allowed"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_forbidden() {
        let validator = AllowBlank::new(false);
        assert!(validator.valid(&json!("hello")).unwrap());
        assert!(validator.valid(&json!("  hi  ")).unwrap());
        assert!(!validator.valid(&json!("")).unwrap());
        assert!(!validator.valid(&json!("   ")).unwrap());
        assert!(!validator.valid(&json!("\t\n\u{3000}\u{180e}")).unwrap());
        assert!(!validator.valid(&json!([])).unwrap());
        assert!(validator.valid(&json!([" "])).unwrap());
        assert_eq!(validator.error_message(), "blank values not allowed");
    }

    #[test]
    fn test_blank_allowed() {
        let validator = AllowBlank::new(true);
        assert!(validator.valid(&json!("")).unwrap());
        assert!(validator.valid(&json!("   ")).unwrap());
        assert_eq!(validator.error_message(), "blank values allowed");
    }

    #[test]
    fn test_empty_forbidden() {
        let validator = AllowEmpty::new(false);
        assert!(!validator.valid(&json!("")).unwrap());
        assert!(!validator.valid(&json!([])).unwrap());
        assert!(!validator.valid(&json!({})).unwrap());
        assert!(validator.valid(&json!("   ")).unwrap());
        assert!(validator.valid(&json!([1])).unwrap());
        assert_eq!(validator.error_message(), "empty values not allowed");
    }

    #[test]
    fn test_empty_allowed() {
        let validator = AllowEmpty::new(true);
        assert!(validator.valid(&json!("")).unwrap());
        assert_eq!(validator.error_message(), "empty values allowed");
    }

    #[test]
    fn test_toggle_must_be_boolean() {
        assert!(AllowBlank::from_config(&json!("no")).is_err());
        assert!(AllowEmpty::from_config(&json!(0)).is_err());
        assert!(AllowEmpty::from_config(&json!(false)).is_ok());
    }

    #[test]
    fn test_numbers_have_no_emptiness() {
        assert!(AllowEmpty::new(false).valid(&json!(0)).is_err());
    }
}
