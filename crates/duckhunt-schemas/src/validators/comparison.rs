//! Equality and ordering validators
//!
//! Ordering validators compare the length of strings, arrays and objects,
//! and the magnitude of numbers: `greater_than: 3` accepts `"abcd"` and `4`.
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

use super::{require_config, Validator};
use crate::error::{SchemaError, SchemaResult};
use crate::value::{display, kind_name, length, loose_eq, Numeric};
use serde_json::Value;
use std::cmp;

/// `equal_to` / `not_equal_to`
#[derive(Debug, Clone)]
pub struct Equality {
    expected: Value,
    negate: bool,
    message: String,
}

impl Equality {
    pub fn equal_to(config: &Value) -> SchemaResult<Self> {
        let expected = require_config("equal_to", config)?.clone();
        let message = format!("not equal to `{}`", display(&expected));
        Ok(Self {
            expected,
            negate: false,
            message,
        })
    }

    pub fn not_equal_to(config: &Value) -> SchemaResult<Self> {
        let expected = require_config("not_equal_to", config)?.clone();
        let message = format!("equal to `{}`", display(&expected));
        Ok(Self {
            expected,
            negate: true,
            message,
        })
    }

    pub fn expected(&self) -> &Value {
        &self.expected
    }
}

impl Validator for Equality {
    fn name(&self) -> &str {
        if self.negate {
            "not_equal_to"
        } else {
            "equal_to"
        }
    }

    fn valid(&self, value: &Value) -> SchemaResult<bool> {
        Ok(loose_eq(value, &self.expected) != self.negate)
    }

    fn error_message(&self) -> &str {
        &self.message
    }
}

/// The comparison performed by an [`Ordering`] validator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingOp {
    GreaterThan,
    GreaterThanOrEqualTo,
    LessThan,
    LessThanOrEqualTo,
}

impl OrderingOp {
    pub fn name(self) -> &'static str {
        match self {
            Self::GreaterThan => "greater_than",
            Self::GreaterThanOrEqualTo => "greater_than_or_equal_to",
            Self::LessThan => "less_than",
            Self::LessThanOrEqualTo => "less_than_or_equal_to",
        }
    }

    fn accepts(self, ordering: cmp::Ordering) -> bool {
        match self {
            Self::GreaterThan => ordering == cmp::Ordering::Greater,
            Self::GreaterThanOrEqualTo => ordering != cmp::Ordering::Less,
            Self::LessThan => ordering == cmp::Ordering::Less,
            Self::LessThanOrEqualTo => ordering != cmp::Ordering::Greater,
        }
    }
}

/// `greater_than`, `greater_than_or_equal_to`, `less_than`,
/// `less_than_or_equal_to`
#[derive(Debug, Clone)]
pub struct Ordering {
    op: OrderingOp,
    bound: Numeric,
    message: String,
}

impl Ordering {
    pub fn new(op: OrderingOp, config: &Value) -> SchemaResult<Self> {
        let config = require_config(op.name(), config)?;
        let bound = Numeric::from_value(config).ok_or_else(|| {
            SchemaError::invalid_argument(format!(
                "`{}` requires a number, got {}",
                op.name(),
                kind_name(config)
            ))
        })?;
        // a failing lower bound means the value is too small, and vice versa
        let message = match op {
            OrderingOp::GreaterThan | OrderingOp::GreaterThanOrEqualTo => {
                format!("less than `{}`", display(config))
            }
            OrderingOp::LessThan | OrderingOp::LessThanOrEqualTo => {
                format!("greater than `{}`", display(config))
            }
        };
        Ok(Self { op, bound, message })
    }

    pub fn op(&self) -> OrderingOp {
        self.op
    }
}

impl Validator for Ordering {
    fn name(&self) -> &str {
        self.op.name()
    }

    fn valid(&self, value: &Value) -> SchemaResult<bool> {
        let subject = match (length(value), Numeric::from_value(value)) {
            (Some(len), _) => Numeric::Int(len as i128),
            (None, Some(number)) => number,
            (None, None) => return Err(SchemaError::incompatible(self.name(), kind_name(value))),
        };
        Ok(subject
            .compare(self.bound)
            .map(|ordering| self.op.accepts(ordering))
            .unwrap_or(false))
    }

    fn error_message(&self) -> &str {
        &self.message
    }
}
