//! Structured validation results
//!
//! A failed validation produces an [`ErrorMap`]: keys are field names, array
//! indices (as strings) or [`BASE`] for errors about the container itself.
//! Each key maps either to a flat list of messages (leaf properties) or to
//! the nested map of a child container, mirroring the shape of the data.
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Key under which container-level errors are stored
pub const BASE: &str = "base";

pub const TYPE_MISMATCH_MESSAGE: &str = "wrong type";
pub const REQUIRED_MESSAGE: &str = "required";
pub const NIL_OBJECT_NOT_ALLOWED_MESSAGE: &str = "nil object not allowed";
pub const DUPLICATE_ITEMS_NOT_ALLOWED_MESSAGE: &str = "duplicate items are not allowed";
pub const UNDEFINED_PROPERTIES_MESSAGE: &str = "has properties not defined in schema";

/// Message for an array shorter than its lower bound
pub fn under_minimum_message(minimum: usize, actual: usize) -> String {
    format!(
        "expected at least {} item(s) but got {} item(s)",
        minimum, actual
    )
}

/// Message for an array longer than its upper bound
pub fn over_maximum_message(maximum: usize, actual: usize) -> String {
    format!(
        "expected at most {} item(s) but got {} item(s)",
        maximum, actual
    )
}

/// Errors reported for one field or array element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldErrors {
    /// Messages from a leaf property
    Messages(Vec<String>),
    /// The error map of a nested hash or array
    Nested(ErrorMap),
}

impl FieldErrors {
    /// No errors at all
    pub fn none() -> Self {
        Self::Messages(Vec::new())
    }

    /// A single leaf message
    pub fn message(message: impl Into<String>) -> Self {
        Self::Messages(vec![message.into()])
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Messages(messages) => messages.is_empty(),
            Self::Nested(map) => map.is_empty(),
        }
    }

    pub fn as_messages(&self) -> Option<&[String]> {
        match self {
            Self::Messages(messages) => Some(messages),
            Self::Nested(_) => None,
        }
    }

    pub fn as_nested(&self) -> Option<&ErrorMap> {
        match self {
            Self::Nested(map) => Some(map),
            Self::Messages(_) => None,
        }
    }

    /// Convert to the plain JSON shape (`[..]` or `{..}`)
    pub fn to_json(&self) -> Value {
        match self {
            Self::Messages(messages) => Value::Array(
                messages.iter().cloned().map(Value::String).collect(),
            ),
            Self::Nested(map) => map.to_json(),
        }
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Messages(messages) => messages.serialize(serializer),
            Self::Nested(map) => map.serialize(serializer),
        }
    }
}

/// Insertion-ordered mapping from field path segment to errors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap {
    entries: Vec<(String, FieldErrors)>,
}

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map holding a single base error
    pub fn with_base(message: impl Into<String>) -> Self {
        let mut map = Self::new();
        map.add_base(message);
        map
    }

    /// Append a container-level message, skipping duplicates
    pub fn add_base(&mut self, message: impl Into<String>) {
        let message = message.into();
        match self.entries.iter_mut().find(|(k, _)| k == BASE) {
            Some((_, FieldErrors::Messages(messages))) => {
                if !messages.contains(&message) {
                    messages.push(message);
                }
            }
            Some((_, nested)) => *nested = FieldErrors::message(message),
            None => self
                .entries
                .push((BASE.to_string(), FieldErrors::message(message))),
        }
    }

    /// Record errors under a key; empty error sets are ignored
    pub fn insert(&mut self, key: impl Into<String>, errors: FieldErrors) {
        if errors.is_empty() {
            return;
        }
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = errors,
            None => self.entries.push((key, errors)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldErrors> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Container-level messages
    pub fn base(&self) -> Option<&[String]> {
        self.messages(BASE)
    }

    /// Flat messages stored under `key`
    pub fn messages(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(FieldErrors::as_messages)
    }

    /// Nested map stored under `key`
    pub fn nested(&self, key: &str) -> Option<&ErrorMap> {
        self.get(key).and_then(FieldErrors::as_nested)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldErrors)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Convert to a plain JSON object
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (key, errors) in &self.entries {
            map.insert(key.clone(), errors.to_json());
        }
        Value::Object(map)
    }

    /// Flatten into one violation per message, with `$.field[0]` style paths
    pub fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        self.collect_violations("$", &mut out);
        out
    }

    fn collect_violations(&self, path: &str, out: &mut Vec<Violation>) {
        for (key, errors) in &self.entries {
            let child_path = if key == BASE {
                path.to_string()
            } else if key.parse::<usize>().is_ok() {
                format!("{}[{}]", path, key)
            } else {
                format!("{}.{}", path, key)
            };

            match errors {
                FieldErrors::Messages(messages) => {
                    out.extend(messages.iter().map(|message| Violation {
                        path: child_path.clone(),
                        message: message.clone(),
                    }));
                }
                FieldErrors::Nested(map) => map.collect_violations(&child_path, out),
            }
        }
    }
}

impl Serialize for ErrorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, errors) in &self.entries {
            map.serialize_entry(key, errors)?;
        }
        map.end()
    }
}

/// A single message attached to a location in the validated value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// JSON path of the offending value
    pub path: String,
    /// Human-readable message
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Outcome of validating one value against a schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Validation {
    errors: ErrorMap,
}

impl Validation {
    pub fn new(errors: ErrorMap) -> Self {
        Self { errors }
    }

    /// True when the value conforms to the schema
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn into_errors(self) -> ErrorMap {
        self.errors
    }
}
