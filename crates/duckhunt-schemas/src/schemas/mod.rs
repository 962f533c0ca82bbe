//! Container schemas
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

pub mod array;
pub mod hash;

pub use array::{ArrayMode, ArraySchema, ArraySchemaBuilder, TupleBuilder};
pub use hash::{HashSchema, HashSchemaBuilder};

use crate::error::SchemaResult;
use crate::property::Property;
use crate::report::Validation;
use serde_json::Value;

/// A top-level schema: either a hash or an array
#[derive(Debug)]
pub enum Schema {
    Hash(HashSchema),
    Array(ArraySchema),
}

impl Schema {
    /// Validate a value against the schema
    pub fn validate(&self, value: &Value) -> SchemaResult<Validation> {
        match self {
            Self::Hash(schema) => schema.validate(value),
            Self::Array(schema) => schema.validate(value),
        }
    }

    pub fn is_valid(&self, value: &Value) -> SchemaResult<bool> {
        Ok(self.validate(value)?.is_valid())
    }

    /// `nested_hash` or `array`
    pub fn kind(&self) -> &str {
        self.as_property().kind()
    }

    pub fn as_property(&self) -> &dyn Property {
        match self {
            Self::Hash(schema) => schema,
            Self::Array(schema) => schema,
        }
    }

    pub fn as_hash(&self) -> Option<&HashSchema> {
        match self {
            Self::Hash(schema) => Some(schema),
            Self::Array(_) => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArraySchema> {
        match self {
            Self::Array(schema) => Some(schema),
            Self::Hash(_) => None,
        }
    }
}

impl From<HashSchema> for Schema {
    fn from(schema: HashSchema) -> Self {
        Self::Hash(schema)
    }
}

impl From<ArraySchema> for Schema {
    fn from(schema: ArraySchema) -> Self {
        Self::Array(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use serde_json::json;

    #[test]
    fn test_dispatch() {
        let hash: Schema = HashSchema::define(|s| s.string("name", Options::new()))
            .unwrap()
            .into();
        let array: Schema = ArraySchema::define(|a| a.integer(Options::new()))
            .unwrap()
            .into();

        assert_eq!(hash.kind(), "nested_hash");
        assert_eq!(array.kind(), "array");
        assert!(hash.is_valid(&json!({"name": "x"})).unwrap());
        assert!(array.is_valid(&json!([1, 2])).unwrap());
        assert!(hash.as_array().is_none());
        assert!(array.as_array().is_some());
    }
}
