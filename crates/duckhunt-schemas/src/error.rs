//! Error types raised while building or running schemas
//!
//! Validation failures are never errors: they are reported through
//! [`crate::report::ErrorMap`]. A [`SchemaError`] means the schema itself is
//! malformed, either at construction time or because a validator was attached
//! to a value it cannot judge.
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Result type for schema construction and validation
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors signalling a broken schema definition
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A property name was declared twice in the same hash schema
    #[error("`{name}` has already been defined in this schema")]
    PropertyAlreadyDefined { name: String },

    /// A validator was attached twice to the same property
    #[error("`{name}` has already been defined in this schema")]
    ValidatorAlreadyDefined { name: String },

    /// Structurally invalid schema (e.g. mixing single-type and tuple arrays)
    #[error("invalid schema: {reason}")]
    InvalidSchema { reason: String },

    /// Missing or malformed constructor argument
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// A configuration value had the wrong type
    #[error("type mismatch: expected {expected}, got {found}")]
    TypeMismatch { expected: String, found: String },

    /// A regular expression failed to compile
    #[error("invalid regular expression `{pattern}`: {reason}")]
    InvalidRegex { pattern: String, reason: String },

    /// No property kind registered under this name
    #[error("unknown property kind `{kind}`")]
    UnknownPropertyKind { kind: String },

    /// No validator registered under this name
    #[error("unknown validator `{name}`")]
    UnknownValidator { name: String },

    /// A container option that the container does not understand
    #[error("unknown option `{option}` for {kind}")]
    UnknownOption { option: String, kind: String },

    /// A declarative definition could not be turned into a schema
    #[error("invalid definition at '{path}': {reason}")]
    InvalidDefinition { path: String, reason: String },

    /// A validator was run against a value it cannot judge
    #[error("validator `{validator}` cannot be applied to {found}")]
    IncompatibleValue { validator: String, found: String },
}

impl SchemaError {
    /// Create an invalid schema error
    pub fn invalid_schema(reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            reason: reason.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Create a definition error anchored at a JSON path
    pub fn invalid_definition(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an incompatible value error
    pub fn incompatible(validator: impl Into<String>, found: impl Into<String>) -> Self {
        Self::IncompatibleValue {
            validator: validator.into(),
            found: found.into(),
        }
    }

    /// Whether the error was raised while running a validation rather than
    /// while building the schema
    pub fn is_runtime(&self) -> bool {
        matches!(self, Self::IncompatibleValue { .. })
    }
}
