//! Loading schema definitions and documents from disk
//!
//! Format is detected from the file extension (`.yaml`, `.yml`, `.json`,
//! `.jsonl`, `.ndjson`).
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use duckhunt_schemas::loader;
//! use std::path::Path;
//!
//! let schema = loader::load_schema(Path::new("person.schema.yaml"))?;
//! for document in loader::load_documents(Path::new("people.yaml"))? {
//!     let validation = schema.validate(&document)?;
//!     println!("valid: {}", validation.is_valid());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod parser;

pub use error::{LoaderError, LoaderResult};
pub use parser::{DocumentParser, Format};

use crate::definition::SchemaDefinition;
use crate::registry::Registry;
use crate::schemas::Schema;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Read a single value from a file
pub fn load_value(path: &Path) -> LoaderResult<Value> {
    DocumentParser::new().parse_file(path)
}

/// Read every document in a file
pub fn load_documents(path: &Path) -> LoaderResult<Vec<Value>> {
    let documents = DocumentParser::new().parse_file_documents(path)?;
    debug!(path = %path.display(), count = documents.len(), "loaded documents");
    Ok(documents)
}

/// Load a schema definition using the global registry
pub fn load_schema(path: &Path) -> LoaderResult<Schema> {
    load_schema_with(path, Registry::global())
}

/// Load a schema definition using an explicit registry
pub fn load_schema_with(path: &Path, registry: &Registry) -> LoaderResult<Schema> {
    let definition = load_value(path)?;
    let schema = SchemaDefinition::build(&definition, registry)
        .map_err(|e| LoaderError::definition_error(path, e))?;
    debug!(path = %path.display(), kind = schema.kind(), "loaded schema");
    Ok(schema)
}
