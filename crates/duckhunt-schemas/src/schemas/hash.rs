//! Hash (object) schemas
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

use super::array::{ArraySchema, ArraySchemaBuilder};
use crate::error::{SchemaError, SchemaResult};
use crate::options::Options;
use crate::property::{self, Property};
use crate::registry::{Registry, ARRAY_KIND, HASH_KIND};
use crate::report::{
    ErrorMap, FieldErrors, Validation, NIL_OBJECT_NOT_ALLOWED_MESSAGE, TYPE_MISMATCH_MESSAGE,
    UNDEFINED_PROPERTIES_MESSAGE,
};
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Validates key/value mappings against a named, ordered set of properties
#[derive(Debug)]
pub struct HashSchema {
    properties: Vec<(String, Box<dyn Property>)>,
    strict_mode: bool,
    required: bool,
    allow_nil: bool,
}

impl HashSchema {
    /// Define a schema with the global registry and default options
    pub fn define<F>(f: F) -> SchemaResult<Self>
    where
        F: FnOnce(&mut HashSchemaBuilder<'_>) -> SchemaResult<()>,
    {
        Self::define_with(Registry::global(), Options::new(), f)
    }

    /// Define a schema with an explicit registry and options
    ///
    /// Recognized options: `required`, `allow_nil` and `strict_mode`
    /// (default `true`). Anything else is rejected.
    pub fn define_with<F>(registry: &Registry, mut options: Options, f: F) -> SchemaResult<Self>
    where
        F: FnOnce(&mut HashSchemaBuilder<'_>) -> SchemaResult<()>,
    {
        let required = options.take_bool("required", true)?;
        let allow_nil = options.take_bool("allow_nil", false)?;
        let strict_mode = options.take_bool("strict_mode", true)?;
        options.ensure_consumed(HASH_KIND)?;

        let mut builder = HashSchemaBuilder {
            registry,
            properties: Vec::new(),
            strict_mode,
        };
        f(&mut builder)?;

        debug!(
            properties = builder.properties.len(),
            strict_mode = builder.strict_mode,
            "defined hash schema"
        );
        Ok(Self {
            properties: builder.properties,
            strict_mode: builder.strict_mode,
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
        let object = match value {
            Value::Null if self.allow_nil => return Ok(ErrorMap::new()),
            Value::Null => return Ok(ErrorMap::with_base(NIL_OBJECT_NOT_ALLOWED_MESSAGE)),
            Value::Object(object) => object,
            _ => return Ok(ErrorMap::with_base(TYPE_MISMATCH_MESSAGE)),
        };

        if self.strict_mode && self.has_undeclared_keys(object) {
            return Ok(ErrorMap::with_base(UNDEFINED_PROPERTIES_MESSAGE));
        }

        let mut errors = ErrorMap::new();
        for (name, property) in &self.properties {
            let field_errors = match object.get(name) {
                Some(field) => property.check(field)?,
                None if property.is_required() => property.missing(),
                None => continue,
            };
            if !field_errors.is_empty() {
                trace!(field = %name, "property failed validation");
            }
            errors.insert(name.clone(), field_errors);
        }
        Ok(errors)
    }

    fn has_undeclared_keys(&self, object: &Map<String, Value>) -> bool {
        object.keys().any(|key| self.property(key).is_none())
    }

    pub fn property(&self, name: &str) -> Option<&dyn Property> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p.as_ref())
    }

    /// Declared properties in declaration order
    pub fn properties(&self) -> impl Iterator<Item = (&str, &dyn Property)> {
        self.properties.iter().map(|(n, p)| (n.as_str(), p.as_ref()))
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(n, _)| n.as_str())
    }

    /// Names of the properties that must be present
    pub fn required_properties(&self) -> impl Iterator<Item = &str> {
        self.properties
            .iter()
            .filter(|(_, p)| p.is_required())
            .map(|(n, _)| n.as_str())
    }

    pub fn is_strict(&self) -> bool {
        self.strict_mode
    }
}

impl Property for HashSchema {
    fn kind(&self) -> &str {
        HASH_KIND
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

/// Collects the properties of a [`HashSchema`] under construction
pub struct HashSchemaBuilder<'r> {
    registry: &'r Registry,
    properties: Vec<(String, Box<dyn Property>)>,
    strict_mode: bool,
}

impl<'r> HashSchemaBuilder<'r> {
    /// Add a property of any registered kind
    pub fn add_property(&mut self, kind: &str, name: &str, options: Options) -> SchemaResult<()> {
        self.ensure_available(name)?;
        let property = self.registry.build_property(kind, options)?;
        self.push(name, property);
        Ok(())
    }

    /// Add an already built property
    pub fn insert(&mut self, name: &str, property: Box<dyn Property>) -> SchemaResult<()> {
        self.ensure_available(name)?;
        self.push(name, property);
        Ok(())
    }

    pub fn string(&mut self, name: &str, options: Options) -> SchemaResult<()> {
        self.add_property("string", name, options)
    }

    pub fn integer(&mut self, name: &str, options: Options) -> SchemaResult<()> {
        self.add_property("integer", name, options)
    }

    pub fn float(&mut self, name: &str, options: Options) -> SchemaResult<()> {
        self.add_property("float", name, options)
    }

    pub fn number(&mut self, name: &str, options: Options) -> SchemaResult<()> {
        self.add_property("number", name, options)
    }

    pub fn boolean(&mut self, name: &str, options: Options) -> SchemaResult<()> {
        self.add_property("boolean", name, options)
    }

    pub fn nil(&mut self, name: &str, options: Options) -> SchemaResult<()> {
        self.add_property("nil", name, options)
    }

    /// Add a nested hash schema defined by `f`
    pub fn nested_hash<F>(&mut self, name: &str, options: Options, f: F) -> SchemaResult<()>
    where
        F: FnOnce(&mut HashSchemaBuilder<'_>) -> SchemaResult<()>,
    {
        self.ensure_available(name)?;
        let schema = HashSchema::define_with(self.registry, options, f)?;
        self.push(name, Box::new(schema));
        Ok(())
    }

    /// Add an array schema defined by `f`
    pub fn array<F>(&mut self, name: &str, options: Options, f: F) -> SchemaResult<()>
    where
        F: FnOnce(&mut ArraySchemaBuilder<'_>) -> SchemaResult<()>,
    {
        self.ensure_available(name)?;
        let schema = ArraySchema::define_with(self.registry, options, f)?;
        self.push(name, Box::new(schema));
        Ok(())
    }

    /// Accept keys that are not declared in the schema
    pub fn relaxed(&mut self) {
        self.strict_mode = false;
    }

    /// Reject keys that are not declared in the schema (the default)
    pub fn strict(&mut self) {
        self.strict_mode = true;
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    fn ensure_available(&self, name: &str) -> SchemaResult<()> {
        if name.trim().is_empty() {
            return Err(SchemaError::invalid_argument("property name cannot be blank"));
        }
        if self.properties.iter().any(|(n, _)| n == name) {
            return Err(SchemaError::PropertyAlreadyDefined {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn push(&mut self, name: &str, property: Box<dyn Property>) {
        trace!(property = %name, kind = property.kind(), "adding property");
        self.properties.push((name.to_string(), property));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile() -> HashSchema {
        HashSchema::define(|s| {
            s.string("name", Options::new())?;
            s.integer("age", Options::new().with("required", false))?;
            Ok(())
        })
        .unwrap()
    }

    #[test]
    fn test_valid_object() {
        let schema = profile();
        assert!(schema.is_valid(&json!({"name": "Ada", "age": 36})).unwrap());
        assert!(schema.is_valid(&json!({"name": "Ada"})).unwrap());
    }

    #[test]
    fn test_wrong_type() {
        let validation = profile().validate(&json!(["name"])).unwrap();
        assert_eq!(validation.errors().base().unwrap(), ["wrong type"]);
    }

    #[test]
    fn test_nil_object() {
        let validation = profile().validate(&Value::Null).unwrap();
        assert_eq!(validation.errors().base().unwrap(), ["nil object not allowed"]);

        let lenient =
            HashSchema::define_with(Registry::global(), Options::new().with("allow_nil", true), |s| {
                s.string("name", Options::new())
            })
            .unwrap();
        assert!(lenient.is_valid(&Value::Null).unwrap());
    }

    #[test]
    fn test_missing_required_and_invalid_fields_accumulate() {
        let schema = HashSchema::define(|s| {
            s.string("name", Options::new())?;
            s.integer("age", Options::new())?;
            s.boolean("admin", Options::new())?;
            Ok(())
        })
        .unwrap();

        let validation = schema.validate(&json!({"age": "old", "admin": true})).unwrap();
        let errors = validation.errors();
        assert_eq!(errors.messages("name").unwrap(), ["required"]);
        assert_eq!(errors.messages("age").unwrap(), ["wrong type"]);
        assert!(!errors.contains_key("admin"));
        assert_eq!(errors.keys().collect::<Vec<_>>(), ["name", "age"]);
    }

    #[test]
    fn test_strict_mode_short_circuits() {
        let schema = profile();
        let validation = schema
            .validate(&json!({"name": 12, "hello": "hello"}))
            .unwrap();
        assert_eq!(validation.errors().len(), 1);
        assert_eq!(
            validation.errors().base().unwrap(),
            ["has properties not defined in schema"]
        );
    }

    #[test]
    fn test_relaxed_mode_ignores_extra_keys() {
        let schema = HashSchema::define(|s| {
            s.relaxed();
            s.string("name", Options::new())
        })
        .unwrap();
        assert!(!schema.is_strict());
        assert!(schema
            .is_valid(&json!({"name": "Ada", "extra": [1, 2, 3]}))
            .unwrap());
    }

    #[test]
    fn test_strict_mode_option() {
        let schema = HashSchema::define_with(
            Registry::global(),
            Options::new().with("strictMode", false),
            |s| s.string("name", Options::new()),
        )
        .unwrap();
        assert!(schema.is_valid(&json!({"name": "Ada", "x": 1})).unwrap());
    }

    #[test]
    fn test_duplicate_property() {
        let err = HashSchema::define(|s| {
            s.string("name", Options::new())?;
            s.integer("name", Options::new())
        })
        .unwrap_err();
        assert_eq!(
            err,
            SchemaError::PropertyAlreadyDefined {
                name: "name".to_string()
            }
        );
    }

    #[test]
    fn test_blank_property_name() {
        let err = HashSchema::define(|s| s.string("  ", Options::new())).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidArgument { .. }));
    }

    #[test]
    fn test_unknown_container_option() {
        let err = HashSchema::define_with(
            Registry::global(),
            Options::new().with("min_size", 2),
            |_| Ok(()),
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::UnknownOption { .. }));
    }

    #[test]
    fn test_required_properties() {
        let schema = profile();
        assert_eq!(schema.required_properties().collect::<Vec<_>>(), ["name"]);
        assert_eq!(schema.property_names().collect::<Vec<_>>(), ["name", "age"]);
        assert_eq!(schema.property("age").unwrap().kind(), "integer");
    }

    #[test]
    fn test_missing_nested_hash_reports_nested_required() {
        let schema = HashSchema::define(|s| {
            s.nested_hash("address", Options::new(), |a| a.string("city", Options::new()))
        })
        .unwrap();
        let validation = schema.validate(&json!({})).unwrap();
        let address = validation.errors().nested("address").unwrap();
        assert_eq!(address.base().unwrap(), ["required"]);
    }
}
