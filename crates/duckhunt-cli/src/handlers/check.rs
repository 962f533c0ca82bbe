//! Check command handler
//!
//! Loads a schema definition without validating any documents and prints
//! the top level of what it declares.
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

use super::ensure_exists;
use crate::cli::CheckArgs;
use crate::error::Result;
use crate::output::OutputWriter;
use duckhunt_schemas::{loader, ArrayMode, Property, Schema};
use serde::Serialize;
use std::path::PathBuf;
use tracing::instrument;

/// Top-level description of a loaded schema
#[derive(Debug, Clone, Serialize)]
pub struct SchemaOutline {
    pub path: PathBuf,
    pub kind: String,
    pub properties: Vec<PropertyOutline>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropertyOutline {
    /// Hash key, `[*]` for every array element, or `[i]` for a tuple position
    pub name: String,
    pub kind: String,
    pub required: bool,
    pub allow_nil: bool,
}

impl PropertyOutline {
    fn new(name: String, property: &dyn Property, required: bool) -> Self {
        Self {
            name,
            kind: property.kind().to_string(),
            required,
            allow_nil: property.allows_nil(),
        }
    }
}

impl SchemaOutline {
    pub fn new(path: PathBuf, schema: &Schema) -> Self {
        let properties = match schema {
            Schema::Hash(hash) => hash
                .properties()
                .map(|(name, p)| PropertyOutline::new(name.to_string(), p, p.is_required()))
                .collect(),
            Schema::Array(array) => match array.mode() {
                ArrayMode::Unset => Vec::new(),
                ArrayMode::Single(p) => {
                    vec![PropertyOutline::new("[*]".to_string(), p.as_ref(), false)]
                }
                ArrayMode::Tuple { required, optional } => required
                    .iter()
                    .map(|p| (p, true))
                    .chain(optional.iter().map(|p| (p, false)))
                    .enumerate()
                    .map(|(i, (p, req))| PropertyOutline::new(format!("[{}]", i), p.as_ref(), req))
                    .collect(),
            },
        };

        Self {
            path,
            kind: schema.kind().to_string(),
            properties,
        }
    }
}

/// Handle the check command
#[instrument(skip_all, fields(schema = %args.schema.display()))]
pub fn handle_check(args: CheckArgs, output: &mut OutputWriter) -> Result<()> {
    ensure_exists(&args.schema)?;
    let schema = loader::load_schema(&args.schema)?;
    let outline = SchemaOutline::new(args.schema, &schema);

    if !output.is_human() {
        return output.data(&outline);
    }

    output.success(&format!(
        "✓ {} is a valid {} schema",
        outline.path.display(),
        outline.kind
    ))?;
    if outline.properties.is_empty() {
        return Ok(());
    }

    let rows = outline
        .properties
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                p.kind.clone(),
                yes_no(p.required),
                yes_no(p.allow_nil),
            ]
        })
        .collect();
    output.section("Properties")?;
    output.table(&["Name", "Kind", "Required", "Allow nil"], rows)
}

fn yes_no(flag: bool) -> String {
    let text = if flag { "yes" } else { "no" };
    text.to_string()
}
