//! `divisible_by` / `not_divisible_by`
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

use super::{require_config, Validator};
use crate::error::{SchemaError, SchemaResult};
use crate::value::{display, kind_name, Numeric};
use serde_json::Value;

/// Checks that the remainder of a division is (or is not) zero
#[derive(Debug, Clone)]
pub struct Divisibility {
    divisor: Numeric,
    negate: bool,
    message: String,
}

impl Divisibility {
    pub fn divisible_by(config: &Value) -> SchemaResult<Self> {
        let divisor = Self::divisor("divisible_by", config)?;
        Ok(Self {
            divisor,
            negate: false,
            message: format!("not divisible by `{}`", display(config)),
        })
    }

    pub fn not_divisible_by(config: &Value) -> SchemaResult<Self> {
        let divisor = Self::divisor("not_divisible_by", config)?;
        Ok(Self {
            divisor,
            negate: true,
            message: format!("divisible by `{}`", display(config)),
        })
    }

    fn divisor(name: &str, config: &Value) -> SchemaResult<Numeric> {
        let config = require_config(name, config)?;
        let divisor = Numeric::from_value(config).ok_or_else(|| {
            SchemaError::invalid_argument(format!(
                "`{}` requires a number, got {}",
                name,
                kind_name(config)
            ))
        })?;
        if divisor.is_zero() {
            return Err(SchemaError::invalid_argument(format!(
                "`{}` cannot divide by zero",
                name
            )));
        }
        Ok(divisor)
    }
}

impl Validator for Divisibility {
    fn name(&self) -> &str {
        if self.negate {
            "not_divisible_by"
        } else {
            "divisible_by"
        }
    }

    fn valid(&self, value: &Value) -> SchemaResult<bool> {
        let number = Numeric::from_value(value)
            .ok_or_else(|| SchemaError::incompatible(self.name(), kind_name(value)))?;
        Ok(number.is_multiple_of(self.divisor) != self.negate)
    }

    fn error_message(&self) -> &str {
        &self.message
    }
}
