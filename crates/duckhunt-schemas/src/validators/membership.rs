//! `accepted_values` / `rejected_values`
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

use super::Validator;
use crate::error::{SchemaError, SchemaResult};
use crate::value::loose_eq;
use serde_json::Value;

/// Set membership against a fixed list of candidates
#[derive(Debug, Clone)]
pub struct Membership {
    values: Vec<Value>,
    accept: bool,
}

impl Membership {
    pub fn accepted(config: &Value) -> SchemaResult<Self> {
        Ok(Self {
            values: Self::candidates(config)?,
            accept: true,
        })
    }

    pub fn rejected(config: &Value) -> SchemaResult<Self> {
        Ok(Self {
            values: Self::candidates(config)?,
            accept: false,
        })
    }

    fn candidates(config: &Value) -> SchemaResult<Vec<Value>> {
        match config {
            Value::Array(values) => Ok(values.clone()),
            _ => Err(SchemaError::invalid_argument("an array must be provided")),
        }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl Validator for Membership {
    fn name(&self) -> &str {
        if self.accept {
            "accepted_values"
        } else {
            "rejected_values"
        }
    }

    fn valid(&self, value: &Value) -> SchemaResult<bool> {
        let found = self.values.iter().any(|candidate| loose_eq(candidate, value));
        Ok(found == self.accept)
    }

    fn error_message(&self) -> &str {
        if self.accept {
            "not an accepted value"
        } else {
            "a rejected value"
        }
    }
}
