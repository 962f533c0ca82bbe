//! Option sets passed to property and validator construction
//!
//! Keys are accepted in any common style (`allow_nil`, `allowNil`,
//! `AllowNil`, `allow-nil`, `:allow_nil`) and stored in snake case.
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

use crate::error::{SchemaError, SchemaResult};
use crate::value::kind_name;
use serde_json::{Map, Value};

/// Normalize an option key to snake case
pub fn normalize_key(key: &str) -> String {
    let key = key.trim().trim_start_matches(':');
    let mut out = String::with_capacity(key.len() + 4);
    let mut prev_lower = false;

    for c in key.chars() {
        if c == '-' || c == ' ' || c == '_' {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            prev_lower = false;
        } else if c.is_uppercase() {
            if prev_lower && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
            prev_lower = false;
        } else {
            out.push(c);
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        }
    }

    out
}

/// An ordered set of named options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    entries: Vec<(String, Value)>,
}

impl Options {
    /// Create an empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from a JSON object
    pub fn from_json(value: Value) -> SchemaResult<Self> {
        match value {
            Value::Object(map) => Self::from_map(map),
            Value::Null => Ok(Self::new()),
            other => Err(SchemaError::TypeMismatch {
                expected: "an object of options".to_string(),
                found: kind_name(&other).to_string(),
            }),
        }
    }

    /// Build options from a JSON map, keeping its order
    pub fn from_map(map: Map<String, Value>) -> SchemaResult<Self> {
        let mut options = Self::new();
        for (key, value) in map {
            options.insert(&key, value)?;
        }
        Ok(options)
    }

    /// Add an option, failing if the normalized key is already present
    pub fn insert(&mut self, key: &str, value: impl Into<Value>) -> SchemaResult<()> {
        let key = normalize_key(key);
        if key.is_empty() {
            return Err(SchemaError::invalid_argument("option name cannot be blank"));
        }
        if self.contains(&key) {
            return Err(SchemaError::invalid_argument(format!(
                "option `{}` given more than once",
                key
            )));
        }
        self.entries.push((key, value.into()));
        Ok(())
    }

    /// Builder-style insert that replaces an existing value
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        let key = normalize_key(key);
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        let key = normalize_key(key);
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Remove an option and return its value
    pub fn take(&mut self, key: &str) -> Option<Value> {
        let key = normalize_key(key);
        let index = self.entries.iter().position(|(k, _)| *k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Remove a boolean option, using `default` when absent
    pub fn take_bool(&mut self, key: &str, default: bool) -> SchemaResult<bool> {
        match self.take(key) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(b),
            Some(other) => Err(SchemaError::TypeMismatch {
                expected: format!("a boolean for `{}`", normalize_key(key)),
                found: kind_name(&other).to_string(),
            }),
        }
    }

    /// Remove an optional non-negative integer option
    pub fn take_size(&mut self, key: &str) -> SchemaResult<Option<usize>> {
        match self.take(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n
                .as_u64()
                .map(|n| Some(n as usize))
                .ok_or_else(|| {
                    SchemaError::invalid_argument(format!(
                        "`{}` must be a non-negative integer, got {}",
                        normalize_key(key),
                        n
                    ))
                }),
            Some(other) => Err(SchemaError::TypeMismatch {
                expected: format!("an integer for `{}`", normalize_key(key)),
                found: kind_name(&other).to_string(),
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over the options in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Fail if any option is left over after a container consumed its own
    pub fn ensure_consumed(&self, kind: &str) -> SchemaResult<()> {
        match self.entries.first() {
            Some((key, _)) => Err(SchemaError::UnknownOption {
                option: key.clone(),
                kind: kind.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl IntoIterator for Options {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_key_styles() {
        assert_eq!(normalize_key("allow_nil"), "allow_nil");
        assert_eq!(normalize_key("allowNil"), "allow_nil");
        assert_eq!(normalize_key("AllowNil"), "allow_nil");
        assert_eq!(normalize_key("allow-nil"), "allow_nil");
        assert_eq!(normalize_key(":allow_nil"), "allow_nil");
        assert_eq!(normalize_key("greaterThanOrEqualTo"), "greater_than_or_equal_to");
    }

    #[test]
    fn test_from_json_keeps_order() {
        let options = Options::from_json(json!({
            "required": false,
            "greaterThan": 3,
            "less_than": 10
        }))
        .unwrap();
        let keys: Vec<_> = options.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["required", "greater_than", "less_than"]);
    }

    #[test]
    fn test_colliding_keys_are_rejected() {
        let result = Options::from_json(json!({"allow_nil": true, "allowNil": false}));
        assert!(matches!(result, Err(SchemaError::InvalidArgument { .. })));
    }

    #[test]
    fn test_take_bool() {
        let mut options = Options::new().with("required", false);
        assert!(!options.take_bool("required", true).unwrap());
        assert!(options.take_bool("required", true).unwrap());

        let mut options = Options::new().with("allow_nil", "yes");
        assert!(options.take_bool("allow_nil", false).is_err());
    }

    #[test]
    fn test_take_size() {
        let mut options = Options::new().with("min_size", 3);
        assert_eq!(options.take_size("min_size").unwrap(), Some(3));
        assert_eq!(options.take_size("max_size").unwrap(), None);

        let mut options = Options::new().with("max_size", -1);
        assert!(options.take_size("max_size").is_err());
    }

    #[test]
    fn test_ensure_consumed() {
        let options = Options::new().with("strictness", true);
        let err = options.ensure_consumed("hash schema").unwrap_err();
        assert_eq!(err.to_string(), "unknown option `strictness` for hash schema");
    }
}
