//! Duckhunt Schemas - declarative validation of structured values
//!
//! Describe the shape of a hash or an array (field types, required fields,
//! per-field validators) with nested builders, then validate arbitrary
//! `serde_json::Value`s against it. Every failure is reported in an error
//! map keyed by field name, array index or `"base"`, nested the same way as
//! the data.
//!
//! ## Features
//!
//! - **Property kinds**: string, integer, float, number, boolean, nil,
//!   nested hashes and arrays (single-type or tuple)
//! - **Validators**: comparisons (by value or by length), divisibility,
//!   accepted/rejected values, regular expressions, blank/empty checks
//! - **Registry**: custom kinds and validators by name
//! - **Declarative definitions**: build schemas from JSON or YAML files
//! - **Batch Processing**: validate many documents with fail-fast limits
//!
//! ## Quick Start
//!
//! ```rust
//! use duckhunt_schemas::{HashSchema, Options};
//! use serde_json::json;
//!
//! let schema = HashSchema::define(|s| {
//!     s.string("name", Options::new().with("allow_blank", false))?;
//!     s.integer("age", Options::new().with("greater_than_or_equal_to", 0))?;
//!     s.array("tags", Options::new().with("required", false), |a| {
//!         a.string(Options::new())
//!     })
//! })?;
//!
//! let validation = schema.validate(&json!({"name": "", "age": -1}))?;
//! assert!(!validation.is_valid());
//! assert_eq!(validation.errors().messages("name").unwrap(), ["blank values not allowed"]);
//! assert_eq!(validation.errors().messages("age").unwrap(), ["less than `0`"]);
//! # Ok::<(), duckhunt_schemas::SchemaError>(())
//! ```
//!
//! ## Validation Rules
//!
//! - A value of the wrong type reports only `"wrong type"`; validators are skipped
//! - `null` is rejected with `"nil object not allowed"` unless `allow_nil` is set
//! - Hash schemas are strict by default and reject undeclared keys
//! - Array elements are checked in order and validation stops at the first
//!   failing element
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

pub mod batch;
pub mod definition;
pub mod error;
pub mod loader;
pub mod options;
pub mod property;
pub mod registry;
pub mod report;
pub mod schemas;
pub mod validators;
pub mod value;

// Re-export commonly used types for convenience
pub use batch::{validate_batch, BatchConfig, BatchReport, DocumentResult};
pub use definition::SchemaDefinition;
pub use error::{SchemaError, SchemaResult};
pub use options::Options;
pub use property::{LeafProperty, Property, TypeMatcher};
pub use registry::{PropertyFactory, Registry, ValidatorFactory};
pub use report::{ErrorMap, FieldErrors, Validation, Violation};
pub use schemas::{
    ArrayMode, ArraySchema, ArraySchemaBuilder, HashSchema, HashSchemaBuilder, Schema,
    TupleBuilder,
};
pub use validators::Validator;
