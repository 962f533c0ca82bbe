//! Schemas described as data
//!
//! A definition is a JSON (or YAML) tree:
//!
//! ```json
//! {
//!   "type": "hash",
//!   "strict_mode": false,
//!   "properties": {
//!     "name": { "type": "string", "allow_blank": false },
//!     "tags": { "type": "array", "element": "string", "validates_uniqueness": true },
//!     "point": { "type": "array", "items": ["integer", "integer"], "optional_items": ["integer"] }
//!   }
//! }
//! ```
//!
//! `type` names a registered kind. Hashes take `properties`, arrays take
//! `element` or `items` / `optional_items`. A bare string is shorthand for
//! `{"type": <string>}`. Every other key is passed on as an option.
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

use crate::error::{SchemaError, SchemaResult};
use crate::options::Options;
use crate::property::Property;
use crate::registry::{Registry, ARRAY_KIND, HASH_KIND};
use crate::schemas::{ArraySchema, HashSchema, Schema, TupleBuilder};
use serde_json::{Map, Value};
use tracing::debug;

const TYPE_KEY: &str = "type";
const PROPERTIES_KEY: &str = "properties";
const ELEMENT_KEY: &str = "element";
const ITEMS_KEY: &str = "items";
const OPTIONAL_ITEMS_KEY: &str = "optional_items";

/// Builds schemas from definition trees
#[derive(Debug, Clone, Copy)]
pub struct SchemaDefinition<'r> {
    registry: &'r Registry,
}

impl<'r> SchemaDefinition<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Build a top-level schema, which must be a hash or an array
    pub fn build(definition: &Value, registry: &'r Registry) -> SchemaResult<Schema> {
        Self::new(registry).schema(definition)
    }

    /// Build a top-level schema
    pub fn schema(&self, definition: &Value) -> SchemaResult<Schema> {
        let node = Node::parse(definition, "$")?;
        let kind = self.resolve(&node)?;
        let schema = match kind.as_str() {
            HASH_KIND => Schema::Hash(self.hash(node)?),
            ARRAY_KIND => Schema::Array(self.array(node)?),
            other => {
                return Err(SchemaError::invalid_definition(
                    "$",
                    format!("top-level schema must be a hash or an array, got `{}`", other),
                ))
            }
        };
        debug!(kind = schema.kind(), "built schema from definition");
        Ok(schema)
    }

    /// Build any property
    pub fn property(&self, definition: &Value, path: &str) -> SchemaResult<Box<dyn Property>> {
        let node = Node::parse(definition, path)?;
        let kind = self.resolve(&node)?;
        match kind.as_str() {
            HASH_KIND => Ok(Box::new(self.hash(node)?)),
            ARRAY_KIND => Ok(Box::new(self.array(node)?)),
            _ => {
                node.reject(&[PROPERTIES_KEY, ELEMENT_KEY, ITEMS_KEY, OPTIONAL_ITEMS_KEY])?;
                let options = node.options()?;
                self.registry
                    .build_property(&kind, options)
                    .map_err(|e| at(&node.path, e))
            }
        }
    }

    fn resolve(&self, node: &Node<'_>) -> SchemaResult<String> {
        self.registry
            .resolve(node.kind)
            .map(str::to_string)
            .map_err(|e| at(&node.path, e))
    }

    fn hash(&self, node: Node<'_>) -> SchemaResult<HashSchema> {
        node.reject(&[ELEMENT_KEY, ITEMS_KEY, OPTIONAL_ITEMS_KEY])?;

        let mut children = Vec::new();
        match node.get(PROPERTIES_KEY) {
            None | Some(Value::Null) => {}
            Some(Value::Object(properties)) => {
                for (name, child) in properties {
                    let path = format!("{}.{}.{}", node.path, PROPERTIES_KEY, name);
                    children.push((name.as_str(), self.property(child, &path)?));
                }
            }
            Some(_) => {
                return Err(SchemaError::invalid_definition(
                    &node.path,
                    "`properties` must be an object",
                ))
            }
        }

        let options = node.options()?;
        HashSchema::define_with(self.registry, options, |builder| {
            for (name, property) in children {
                builder.insert(name, property)?;
            }
            Ok(())
        })
        .map_err(|e| at(&node.path, e))
    }

    fn array(&self, node: Node<'_>) -> SchemaResult<ArraySchema> {
        node.reject(&[PROPERTIES_KEY])?;

        let element = match node.get(ELEMENT_KEY) {
            None | Some(Value::Null) => None,
            Some(definition) => {
                let path = format!("{}.{}", node.path, ELEMENT_KEY);
                Some(self.property(definition, &path)?)
            }
        };
        let items = self.tuple(&node, ITEMS_KEY)?;
        let optional_items = self.tuple(&node, OPTIONAL_ITEMS_KEY)?;

        let options = node.options()?;
        ArraySchema::define_with(self.registry, options, |builder| {
            if let Some(element) = element {
                builder.set(element)?;
            }
            if let Some(items) = items {
                builder.items(|tuple| fill(tuple, items))?;
            }
            if let Some(optional_items) = optional_items {
                builder.optional_items(|tuple| fill(tuple, optional_items))?;
            }
            Ok(())
        })
        .map_err(|e| at(&node.path, e))
    }

    fn tuple(&self, node: &Node<'_>, key: &str) -> SchemaResult<Option<Vec<Box<dyn Property>>>> {
        match node.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(definitions)) => definitions
                .iter()
                .enumerate()
                .map(|(i, definition)| {
                    self.property(definition, &format!("{}.{}[{}]", node.path, key, i))
                })
                .collect::<SchemaResult<Vec<_>>>()
                .map(Some),
            Some(_) => Err(SchemaError::invalid_definition(
                &node.path,
                format!("`{}` must be an array of definitions", key),
            )),
        }
    }
}

fn fill(tuple: &mut TupleBuilder<'_>, properties: Vec<Box<dyn Property>>) -> SchemaResult<()> {
    for property in properties {
        tuple.push(property);
    }
    Ok(())
}

/// Anchor a construction error at a definition path
fn at(path: &str, error: SchemaError) -> SchemaError {
    match error {
        SchemaError::InvalidDefinition { .. } => error,
        other => SchemaError::invalid_definition(path, other.to_string()),
    }
}

/// One definition node: its kind plus the remaining keys
struct Node<'a> {
    path: String,
    kind: &'a str,
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> Node<'a> {
    fn parse(definition: &'a Value, path: &str) -> SchemaResult<Self> {
        match definition {
            Value::String(kind) => Ok(Self {
                path: path.to_string(),
                kind,
                fields: None,
            }),
            Value::Object(fields) => {
                let kind = match fields.get(TYPE_KEY) {
                    Some(Value::String(kind)) => kind.as_str(),
                    Some(_) => {
                        return Err(SchemaError::invalid_definition(path, "`type` must be a string"))
                    }
                    None => return Err(SchemaError::invalid_definition(path, "missing `type`")),
                };
                Ok(Self {
                    path: path.to_string(),
                    kind,
                    fields: Some(fields),
                })
            }
            _ => Err(SchemaError::invalid_definition(
                path,
                "a definition must be a type name or an object",
            )),
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields.and_then(|fields| fields.get(key))
    }

    /// Fail if any structural key not valid for this kind is present
    fn reject(&self, keys: &[&str]) -> SchemaResult<()> {
        match keys.iter().find(|key| self.get(key).is_some()) {
            Some(key) => Err(SchemaError::invalid_definition(
                &self.path,
                format!("`{}` is not valid for kind `{}`", key, self.kind),
            )),
            None => Ok(()),
        }
    }

    /// Every key that is not structural, as options
    fn options(&self) -> SchemaResult<Options> {
        let mut options = Options::new();
        let structural = [
            TYPE_KEY,
            PROPERTIES_KEY,
            ELEMENT_KEY,
            ITEMS_KEY,
            OPTIONAL_ITEMS_KEY,
        ];
        for (key, value) in self.fields.into_iter().flatten() {
            if structural.contains(&key.as_str()) {
                continue;
            }
            options
                .insert(key, value.clone())
                .map_err(|e| at(&self.path, e))?;
        }
        Ok(options)
    }
}
