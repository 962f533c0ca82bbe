//! Value validators attached to leaf properties
//!
//! A validator is an immutable predicate configured once at construction,
//! with a fixed error message. Validators only run after the owning property
//! has confirmed the value's type.
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

pub mod comparison;
pub mod divisibility;
pub mod matches;
pub mod membership;
pub mod presence;

pub use comparison::{Equality, Ordering, OrderingOp};
pub use divisibility::Divisibility;
pub use matches::Matches;
pub use membership::Membership;
pub use presence::{AllowBlank, AllowEmpty};

use crate::error::{SchemaError, SchemaResult};
use serde_json::Value;
use std::fmt;

/// A named, configurable predicate over a single value
pub trait Validator: fmt::Debug + Send + Sync {
    /// Registry name of this validator (e.g. `greater_than`)
    fn name(&self) -> &str;

    /// Check a value. An `Err` means the validator cannot judge this kind of
    /// value at all, which points at a broken schema.
    fn valid(&self, value: &Value) -> SchemaResult<bool>;

    /// Message recorded when `valid` returns `false`
    fn error_message(&self) -> &str;
}

/// Reject a missing (null) configuration value
pub(crate) fn require_config<'a>(name: &str, config: &'a Value) -> SchemaResult<&'a Value> {
    if config.is_null() {
        return Err(SchemaError::invalid_argument(format!(
            "a value must be provided for `{}`",
            name
        )));
    }
    Ok(config)
}

/// Names of every validator shipped with the crate
pub const BUILTIN_VALIDATORS: &[&str] = &[
    "equal_to",
    "not_equal_to",
    "greater_than",
    "greater_than_or_equal_to",
    "less_than",
    "less_than_or_equal_to",
    "divisible_by",
    "not_divisible_by",
    "accepted_values",
    "rejected_values",
    "matches",
    "allow_blank",
    "allow_empty",
];

/// Build a builtin validator by name
pub fn build_builtin(name: &str, config: &Value) -> SchemaResult<Box<dyn Validator>> {
    let validator: Box<dyn Validator> = match name {
        "equal_to" => Box::new(Equality::equal_to(config)?),
        "not_equal_to" => Box::new(Equality::not_equal_to(config)?),
        "greater_than" => Box::new(Ordering::new(OrderingOp::GreaterThan, config)?),
        "greater_than_or_equal_to" => {
            Box::new(Ordering::new(OrderingOp::GreaterThanOrEqualTo, config)?)
        }
        "less_than" => Box::new(Ordering::new(OrderingOp::LessThan, config)?),
        "less_than_or_equal_to" => Box::new(Ordering::new(OrderingOp::LessThanOrEqualTo, config)?),
        "divisible_by" => Box::new(Divisibility::divisible_by(config)?),
        "not_divisible_by" => Box::new(Divisibility::not_divisible_by(config)?),
        "accepted_values" => Box::new(Membership::accepted(config)?),
        "rejected_values" => Box::new(Membership::rejected(config)?),
        "matches" => Box::new(Matches::from_config(config)?),
        "allow_blank" => Box::new(AllowBlank::from_config(config)?),
        "allow_empty" => Box::new(AllowEmpty::from_config(config)?),
        other => {
            return Err(SchemaError::UnknownValidator {
                name: other.to_string(),
            })
        }
    };
    Ok(validator)
}
