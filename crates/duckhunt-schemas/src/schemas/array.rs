//! Array schemas
//!
//! An array schema is either single-type (every element conforms to one
//! property) or a tuple (each position has its own property, optionally
//! followed by optional positions). The two modes cannot be mixed. A schema
//! declaring neither only checks the container itself.
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

use super::hash::{HashSchema, HashSchemaBuilder};
use crate::error::{SchemaError, SchemaResult};
use crate::options::Options;
use crate::property::{self, Property};
use crate::registry::{Registry, ARRAY_KIND};
use crate::report::{
    over_maximum_message, under_minimum_message, ErrorMap, FieldErrors, Validation,
    DUPLICATE_ITEMS_NOT_ALLOWED_MESSAGE, NIL_OBJECT_NOT_ALLOWED_MESSAGE, TYPE_MISMATCH_MESSAGE,
};
use serde_json::Value;
use tracing::{debug, trace};

/// How the elements of an array are described
#[derive(Debug, Default)]
pub enum ArrayMode {
    /// No element description; any elements are accepted
    #[default]
    Unset,
    /// Every element conforms to one property
    Single(Box<dyn Property>),
    /// Positional properties
    Tuple {
        required: Vec<Box<dyn Property>>,
        optional: Vec<Box<dyn Property>>,
    },
}

#[derive(Debug)]
pub struct ArraySchema {
    mode: ArrayMode,
    validates_uniqueness: bool,
    min_size: Option<usize>,
    max_size: Option<usize>,
    required: bool,
    allow_nil: bool,
}

impl ArraySchema {
    /// Define a schema with the global registry and default options
    pub fn define<F>(f: F) -> SchemaResult<Self>
    where
        F: FnOnce(&mut ArraySchemaBuilder<'_>) -> SchemaResult<()>,
    {
        Self::define_with(Registry::global(), Options::new(), f)
    }

    /// Define a schema with an explicit registry and options
    ///
    /// Recognized options: `required`, `allow_nil`, `validates_uniqueness`,
    /// `min_size` and `max_size`.
    pub fn define_with<F>(registry: &Registry, mut options: Options, f: F) -> SchemaResult<Self>
    where
        F: FnOnce(&mut ArraySchemaBuilder<'_>) -> SchemaResult<()>,
    {
        let required = options.take_bool("required", true)?;
        let allow_nil = options.take_bool("allow_nil", false)?;
        let validates_uniqueness = options.take_bool("validates_uniqueness", false)?;
        let min_size = options.take_size("min_size")?;
        let max_size = options.take_size("max_size")?;
        options.ensure_consumed(ARRAY_KIND)?;

        let mut builder = ArraySchemaBuilder {
            registry,
            mode: ArrayMode::Unset,
        };
        f(&mut builder)?;

        debug!(
            mode = builder.mode.name(),
            validates_uniqueness, "defined array schema"
        );
        Ok(Self {
            mode: builder.mode,
            validates_uniqueness,
            min_size,
            max_size,
            required,
            allow_nil,
        })
    }

    /// Validate a value, returning every error found
    pub fn validate(&self, value: &Value) -> SchemaResult<Validation> {
        Ok(Validation::new(self.errors_for(value)?))
    }

    pub fn is_valid(&self, value: &Value) -> SchemaResult<bool> {
        Ok(self.validate(value)?.is_valid())
    }

    fn errors_for(&self, value: &Value) -> SchemaResult<ErrorMap> {
        let items = match value {
            Value::Null if self.allow_nil => return Ok(ErrorMap::new()),
            Value::Null => return Ok(ErrorMap::with_base(NIL_OBJECT_NOT_ALLOWED_MESSAGE)),
            Value::Array(items) => items,
            _ => return Ok(ErrorMap::with_base(TYPE_MISMATCH_MESSAGE)),
        };

        if self.validates_uniqueness && has_duplicates(items) {
            return Ok(ErrorMap::with_base(DUPLICATE_ITEMS_NOT_ALLOWED_MESSAGE));
        }

        match &self.mode {
            ArrayMode::Unset => Ok(self.check_bounds(items.len(), self.min_size, self.max_size)),
            ArrayMode::Single(element) => {
                let errors = self.check_bounds(items.len(), self.min_size, self.max_size);
                if !errors.is_empty() {
                    return Ok(errors);
                }
                check_positions(items.iter().enumerate().map(|(i, item)| (i, item, element)))
            }
            ArrayMode::Tuple { required, optional } => {
                let minimum = required.len();
                let maximum = minimum + optional.len();
                let errors = self.check_bounds(items.len(), Some(minimum), Some(maximum));
                if !errors.is_empty() {
                    return Ok(errors);
                }
                // the size check guarantees every required position exists;
                // optional positions stop where the array ends
                check_positions(
                    required
                        .iter()
                        .chain(optional.iter())
                        .zip(items.iter())
                        .enumerate()
                        .map(|(i, (property, item))| (i, item, property)),
                )
            }
        }
    }

    fn check_bounds(&self, len: usize, min: Option<usize>, max: Option<usize>) -> ErrorMap {
        match (min, max) {
            (Some(min), _) if len < min => ErrorMap::with_base(under_minimum_message(min, len)),
            (_, Some(max)) if len > max => ErrorMap::with_base(over_maximum_message(max, len)),
            _ => ErrorMap::new(),
        }
    }

    pub fn mode(&self) -> &ArrayMode {
        &self.mode
    }

    /// The element property of a single-type schema
    pub fn single_type_property(&self) -> Option<&dyn Property> {
        match &self.mode {
            ArrayMode::Single(property) => Some(property.as_ref()),
            _ => None,
        }
    }

    pub fn tuple_properties(&self) -> Option<&[Box<dyn Property>]> {
        match &self.mode {
            ArrayMode::Tuple { required, .. } => Some(required),
            _ => None,
        }
    }

    pub fn optional_tuple_properties(&self) -> Option<&[Box<dyn Property>]> {
        match &self.mode {
            ArrayMode::Tuple { optional, .. } => Some(optional),
            _ => None,
        }
    }

    pub fn validates_uniqueness(&self) -> bool {
        self.validates_uniqueness
    }

    pub fn min_size(&self) -> Option<usize> {
        self.min_size
    }

    pub fn max_size(&self) -> Option<usize> {
        self.max_size
    }
}

/// Validate positions in order, stopping at the first failing element
fn check_positions<'a, I>(positions: I) -> SchemaResult<ErrorMap>
where
    I: Iterator<Item = (usize, &'a Value, &'a Box<dyn Property>)>,
{
    let mut errors = ErrorMap::new();
    for (index, item, property) in positions {
        let item_errors = property.check(item)?;
        if !item_errors.is_empty() {
            trace!(index, "array element failed validation");
            errors.insert(index.to_string(), item_errors);
            break;
        }
    }
    Ok(errors)
}

fn has_duplicates(items: &[Value]) -> bool {
    items
        .iter()
        .enumerate()
        .any(|(i, item)| items[..i].contains(item))
}

impl ArrayMode {
    fn name(&self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Single(_) => "single",
            Self::Tuple { .. } => "tuple",
        }
    }
}

impl Property for ArraySchema {
    fn kind(&self) -> &str {
        ARRAY_KIND
    }

    fn is_required(&self) -> bool {
        self.required
    }

    fn allows_nil(&self) -> bool {
        self.allow_nil
    }

    fn check(&self, value: &Value) -> SchemaResult<FieldErrors> {
        Ok(property::nested(self.errors_for(value)?))
    }

    fn missing(&self) -> FieldErrors {
        property::missing_container()
    }
}

/// Describes the elements of an [`ArraySchema`] under construction
pub struct ArraySchemaBuilder<'r> {
    registry: &'r Registry,
    mode: ArrayMode,
}

impl<'r> ArraySchemaBuilder<'r> {
    /// Set the single element property to a registered kind
    pub fn add_property(&mut self, kind: &str, options: Options) -> SchemaResult<()> {
        self.ensure_single_available()?;
        let property = self.registry.build_property(kind, options)?;
        self.mode = ArrayMode::Single(property);
        Ok(())
    }

    /// Set the single element property to an already built property
    pub fn set(&mut self, property: Box<dyn Property>) -> SchemaResult<()> {
        self.ensure_single_available()?;
        self.mode = ArrayMode::Single(property);
        Ok(())
    }

    pub fn string(&mut self, options: Options) -> SchemaResult<()> {
        self.add_property("string", options)
    }

    pub fn integer(&mut self, options: Options) -> SchemaResult<()> {
        self.add_property("integer", options)
    }

    pub fn float(&mut self, options: Options) -> SchemaResult<()> {
        self.add_property("float", options)
    }

    pub fn number(&mut self, options: Options) -> SchemaResult<()> {
        self.add_property("number", options)
    }

    pub fn boolean(&mut self, options: Options) -> SchemaResult<()> {
        self.add_property("boolean", options)
    }

    pub fn nil(&mut self, options: Options) -> SchemaResult<()> {
        self.add_property("nil", options)
    }

    /// Elements are hashes described by `f`
    pub fn nested_hash<F>(&mut self, options: Options, f: F) -> SchemaResult<()>
    where
        F: FnOnce(&mut HashSchemaBuilder<'_>) -> SchemaResult<()>,
    {
        self.ensure_single_available()?;
        let schema = HashSchema::define_with(self.registry, options, f)?;
        self.mode = ArrayMode::Single(Box::new(schema));
        Ok(())
    }

    /// Elements are arrays described by `f`
    pub fn array<F>(&mut self, options: Options, f: F) -> SchemaResult<()>
    where
        F: FnOnce(&mut ArraySchemaBuilder<'_>) -> SchemaResult<()>,
    {
        self.ensure_single_available()?;
        let schema = ArraySchema::define_with(self.registry, options, f)?;
        self.mode = ArrayMode::Single(Box::new(schema));
        Ok(())
    }

    /// Declare the required tuple positions
    pub fn items<F>(&mut self, f: F) -> SchemaResult<()>
    where
        F: FnOnce(&mut TupleBuilder<'_>) -> SchemaResult<()>,
    {
        let items = self.collect_tuple(f)?;
        match &mut self.mode {
            ArrayMode::Tuple { required, .. } if required.is_empty() => *required = items,
            ArrayMode::Tuple { .. } => {
                return Err(SchemaError::invalid_schema(
                    "tuple items have already been defined for this schema",
                ))
            }
            mode => {
                *mode = ArrayMode::Tuple {
                    required: items,
                    optional: Vec::new(),
                }
            }
        }
        Ok(())
    }

    /// Declare the optional tuple positions that follow the required ones
    pub fn optional_items<F>(&mut self, f: F) -> SchemaResult<()>
    where
        F: FnOnce(&mut TupleBuilder<'_>) -> SchemaResult<()>,
    {
        let items = self.collect_tuple(f)?;
        match &mut self.mode {
            ArrayMode::Tuple { optional, .. } if optional.is_empty() => *optional = items,
            ArrayMode::Tuple { .. } => {
                return Err(SchemaError::invalid_schema(
                    "optional tuple items have already been defined for this schema",
                ))
            }
            mode => {
                *mode = ArrayMode::Tuple {
                    required: Vec::new(),
                    optional: items,
                }
            }
        }
        Ok(())
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    fn collect_tuple<F>(&self, f: F) -> SchemaResult<Vec<Box<dyn Property>>>
    where
        F: FnOnce(&mut TupleBuilder<'_>) -> SchemaResult<()>,
    {
        if let ArrayMode::Single(_) = self.mode {
            return Err(SchemaError::invalid_schema(
                "cannot mix single-type and tuple definitions",
            ));
        }
        let mut tuple = TupleBuilder {
            registry: self.registry,
            properties: Vec::new(),
        };
        f(&mut tuple)?;
        if tuple.properties.is_empty() {
            return Err(SchemaError::invalid_argument(
                "a block of properties must be given to define the tuple items",
            ));
        }
        Ok(tuple.properties)
    }

    fn ensure_single_available(&self) -> SchemaResult<()> {
        match self.mode {
            ArrayMode::Unset => Ok(()),
            ArrayMode::Single(_) => Err(SchemaError::invalid_schema(
                "single type property has already been defined for this schema",
            )),
            ArrayMode::Tuple { .. } => Err(SchemaError::invalid_schema(
                "cannot mix single-type and tuple definitions",
            )),
        }
    }
}

/// Collects the positional properties of a tuple array
pub struct TupleBuilder<'r> {
    registry: &'r Registry,
    properties: Vec<Box<dyn Property>>,
}

impl<'r> TupleBuilder<'r> {
    /// Append a property of any registered kind
    pub fn add_property(&mut self, kind: &str, options: Options) -> SchemaResult<()> {
        let property = self.registry.build_property(kind, options)?;
        self.properties.push(property);
        Ok(())
    }

    /// Append an already built property
    pub fn push(&mut self, property: Box<dyn Property>) {
        self.properties.push(property);
    }

    pub fn string(&mut self, options: Options) -> SchemaResult<()> {
        self.add_property("string", options)
    }

    pub fn integer(&mut self, options: Options) -> SchemaResult<()> {
        self.add_property("integer", options)
    }

    pub fn float(&mut self, options: Options) -> SchemaResult<()> {
        self.add_property("float", options)
    }

    pub fn number(&mut self, options: Options) -> SchemaResult<()> {
        self.add_property("number", options)
    }

    pub fn boolean(&mut self, options: Options) -> SchemaResult<()> {
        self.add_property("boolean", options)
    }

    pub fn nil(&mut self, options: Options) -> SchemaResult<()> {
        self.add_property("nil", options)
    }

    pub fn nested_hash<F>(&mut self, options: Options, f: F) -> SchemaResult<()>
    where
        F: FnOnce(&mut HashSchemaBuilder<'_>) -> SchemaResult<()>,
    {
        let schema = HashSchema::define_with(self.registry, options, f)?;
        self.properties.push(Box::new(schema));
        Ok(())
    }

    pub fn array<F>(&mut self, options: Options, f: F) -> SchemaResult<()>
    where
        F: FnOnce(&mut ArraySchemaBuilder<'_>) -> SchemaResult<()>,
    {
        let schema = ArraySchema::define_with(self.registry, options, f)?;
        self.properties.push(Box::new(schema));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
