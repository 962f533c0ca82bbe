//! Kinds command handler
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

use crate::error::Result;
use crate::output::OutputWriter;
use duckhunt_schemas::Registry;
use serde::Serialize;

/// Everything a schema definition can name
#[derive(Debug, Clone, Serialize)]
pub struct RegistryListing {
    pub kinds: Vec<KindListing>,
    pub validators: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct KindListing {
    pub name: String,
    pub aliases: Vec<String>,
}

impl RegistryListing {
    pub fn new(registry: &Registry) -> Self {
        let kinds = registry
            .kinds()
            .map(|kind| KindListing {
                name: kind.to_string(),
                aliases: registry
                    .aliases()
                    .filter(|(_, target)| *target == kind)
                    .map(|(alias, _)| alias.to_string())
                    .collect(),
            })
            .collect();

        Self {
            kinds,
            validators: registry.validators().map(str::to_string).collect(),
        }
    }
}

/// Handle the kinds command
pub fn handle_kinds(output: &mut OutputWriter) -> Result<()> {
    let listing = RegistryListing::new(Registry::global());
    tracing::debug!(
        kinds = listing.kinds.len(),
        validators = listing.validators.len(),
        "listing registry"
    );

    if !output.is_human() {
        return output.data(&listing);
    }

    output.section("Kinds")?;
    let rows = listing
        .kinds
        .iter()
        .map(|kind| vec![kind.name.clone(), kind.aliases.join(", ")])
        .collect();
    output.table(&["Kind", "Aliases"], rows)?;

    output.section("Validators")?;
    for name in &listing.validators {
        output.writeln(&format!("  {}", name))?;
    }
    Ok(())
}
