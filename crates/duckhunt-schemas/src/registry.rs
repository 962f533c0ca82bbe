//! Kind and validator registry
//!
//! Maps property kind names (`string`, `array`, ...) and validator names
//! (`greater_than`, ...) to factories. Builders and declarative definitions
//! resolve every name through a registry, so custom kinds and validators
//! become available everywhere once registered.
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

use crate::error::{SchemaError, SchemaResult};
use crate::options::{normalize_key, Options};
use crate::property::{builtin_matchers, LeafProperty, Property, TypeMatcher};
use crate::schemas::{ArraySchema, HashSchema};
use crate::validators::{self, Validator};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Builds a property of one kind from its options
pub type PropertyFactory =
    Arc<dyn Fn(Options, &Registry) -> SchemaResult<Box<dyn Property>> + Send + Sync>;

/// Builds a validator from its configuration value
pub type ValidatorFactory = Arc<dyn Fn(&Value) -> SchemaResult<Box<dyn Validator>> + Send + Sync>;

/// Kind names that denote an array schema
pub const ARRAY_KIND: &str = "array";

/// Kind name of a nested hash schema, plus accepted aliases
pub const HASH_KIND: &str = "nested_hash";
pub const HASH_KIND_ALIASES: &[&str] = &["hash", "object"];

#[derive(Clone)]
pub struct Registry {
    kinds: BTreeMap<String, PropertyFactory>,
    aliases: BTreeMap<String, String>,
    validators: BTreeMap<String, ValidatorFactory>,
}

impl Registry {
    /// A registry with nothing registered
    pub fn empty() -> Self {
        Self {
            kinds: BTreeMap::new(),
            aliases: BTreeMap::new(),
            validators: BTreeMap::new(),
        }
    }

    /// Shared registry holding the builtin kinds and validators
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::default)
    }

    /// Register a property kind under `name`, replacing any previous one
    pub fn register_kind(&mut self, name: &str, factory: PropertyFactory) {
        let name = normalize_key(name);
        debug!(kind = %name, "registering property kind");
        self.aliases.remove(&name);
        self.kinds.insert(name, factory);
    }

    /// Register a leaf kind from a type predicate
    pub fn register_leaf_kind(&mut self, name: &str, matcher: TypeMatcher) {
        let kind = normalize_key(name);
        self.register_kind(&kind, leaf_factory(kind.clone(), matcher, false));
    }

    /// Make `alias` resolve to the already registered `kind`
    pub fn register_alias(&mut self, alias: &str, kind: &str) -> SchemaResult<()> {
        let kind = self.resolve(kind)?.to_string();
        self.aliases.insert(normalize_key(alias), kind);
        Ok(())
    }

    /// Register a validator under `name`, replacing any previous one
    pub fn register_validator(&mut self, name: &str, factory: ValidatorFactory) {
        let name = normalize_key(name);
        debug!(validator = %name, "registering validator");
        self.validators.insert(name, factory);
    }

    /// Canonical kind name for `kind`, following aliases
    pub fn resolve(&self, kind: &str) -> SchemaResult<&str> {
        let key = normalize_key(kind);
        if let Some((name, _)) = self.kinds.get_key_value(&key) {
            return Ok(name.as_str());
        }
        self.aliases
            .get(&key)
            .map(String::as_str)
            .ok_or_else(|| SchemaError::UnknownPropertyKind {
                kind: kind.to_string(),
            })
    }

    pub fn has_kind(&self, kind: &str) -> bool {
        self.resolve(kind).is_ok()
    }

    pub fn has_validator(&self, name: &str) -> bool {
        self.validators.contains_key(&normalize_key(name))
    }

    /// Build a property of `kind`
    pub fn build_property(&self, kind: &str, options: Options) -> SchemaResult<Box<dyn Property>> {
        let name = self.resolve(kind)?;
        let factory = self
            .kinds
            .get(name)
            .ok_or_else(|| SchemaError::UnknownPropertyKind {
                kind: kind.to_string(),
            })?;
        factory(options, self)
    }

    /// Build the validator registered under `name`
    pub fn build_validator(&self, name: &str, config: &Value) -> SchemaResult<Box<dyn Validator>> {
        let factory = self
            .validators
            .get(&normalize_key(name))
            .ok_or_else(|| SchemaError::UnknownValidator {
                name: name.to_string(),
            })?;
        factory(config)
    }

    /// Registered kind names in sorted order, aliases excluded
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(String::as_str)
    }

    /// Alias → kind pairs in sorted order
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(a, k)| (a.as_str(), k.as_str()))
    }

    /// Registered validator names in sorted order
    pub fn validators(&self) -> impl Iterator<Item = &str> {
        self.validators.keys().map(String::as_str)
    }
}

impl Default for Registry {
    fn default() -> Self {
        let mut registry = Self::empty();

        for (kind, matcher) in builtin_matchers() {
            // a nil property always accepts null
            let force_nil = kind == "nil";
            registry.register_kind(kind, leaf_factory(kind.to_string(), matcher, force_nil));
        }

        registry.register_kind(
            ARRAY_KIND,
            Arc::new(
                |options: Options, registry: &Registry| -> SchemaResult<Box<dyn Property>> {
                    let schema = ArraySchema::define_with(registry, options, |_| Ok(()))?;
                    Ok(Box::new(schema))
                },
            ),
        );
        registry.register_kind(
            HASH_KIND,
            Arc::new(
                |options: Options, registry: &Registry| -> SchemaResult<Box<dyn Property>> {
                    let schema = HashSchema::define_with(registry, options, |_| Ok(()))?;
                    Ok(Box::new(schema))
                },
            ),
        );
        for alias in HASH_KIND_ALIASES {
            registry
                .aliases
                .insert(alias.to_string(), HASH_KIND.to_string());
        }

        for name in validators::BUILTIN_VALIDATORS {
            let builtin = *name;
            registry.register_validator(
                builtin,
                Arc::new(move |config: &Value| validators::build_builtin(builtin, config)),
            );
        }

        registry
    }
}

fn leaf_factory(kind: String, matcher: TypeMatcher, force_nil: bool) -> PropertyFactory {
    Arc::new(
        move |options: Options, registry: &Registry| -> SchemaResult<Box<dyn Property>> {
            let property =
                LeafProperty::from_options(kind.clone(), matcher.clone(), options, registry)?;
            if force_nil {
                return Ok(Box::new(property.allow_nil(true)));
            }
            Ok(Box::new(property))
        },
    )
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("kinds", &self.kinds.keys().collect::<Vec<_>>())
            .field("aliases", &self.aliases)
            .field("validators", &self.validators.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::FieldErrors;
    use serde_json::json;

    #[derive(Debug)]
    struct EvenLength;

    impl Validator for EvenLength {
        fn name(&self) -> &str {
            "even_length"
        }

        fn valid(&self, value: &Value) -> SchemaResult<bool> {
            Ok(value.as_str().map(|s| s.len() % 2 == 0).unwrap_or(false))
        }

        fn error_message(&self) -> &str {
            "odd length"
        }
    }

    #[test]
    fn test_builtin_kinds() {
        let registry = Registry::default();
        let kinds: Vec<&str> = registry.kinds().collect();
        for kind in ["array", "boolean", "float", "integer", "nested_hash", "nil", "number", "string"] {
            assert!(kinds.contains(&kind), "{}", kind);
        }
        assert_eq!(registry.resolve("hash").unwrap(), "nested_hash");
        assert_eq!(registry.resolve("Object").unwrap(), "nested_hash");
        assert_eq!(registry.resolve(":string").unwrap(), "string");
    }

    #[test]
    fn test_unknown_kind() {
        let err = Registry::default()
            .build_property("date", Options::new())
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownPropertyKind {
                kind: "date".to_string()
            }
        );
    }

    #[test]
    fn test_nil_kind_allows_nil() {
        let property = Registry::default()
            .build_property("nil", Options::new())
            .unwrap();
        assert!(property.allows_nil());
        assert!(property.check(&Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_validator_names_accept_any_key_style() {
        let registry = Registry::default();
        assert!(registry.has_validator("greaterThan"));
        assert!(registry.has_validator("accepted-values"));
        assert!(!registry.has_validator("shorter_than"));
    }

    #[test]
    fn test_custom_kind_and_validator() {
        let mut registry = Registry::default();
        registry.register_leaf_kind(
            "uuid",
            Arc::new(|v: &Value| v.as_str().map(|s| s.len() == 36).unwrap_or(false)),
        );
        registry.register_validator(
            "even_length",
            Arc::new(|_: &Value| -> SchemaResult<Box<dyn Validator>> { Ok(Box::new(EvenLength)) }),
        );
        registry.register_alias("guid", "uuid").unwrap();

        let property = registry
            .build_property("guid", Options::new().with("even_length", true))
            .unwrap();
        assert_eq!(property.kind(), "uuid");
        assert!(property
            .check(&json!("123e4567-e89b-12d3-a456-426614174000"))
            .unwrap()
            .is_empty());
        assert_eq!(
            property.check(&json!("nope")).unwrap(),
            FieldErrors::message("wrong type")
        );
    }

    #[test]
    fn test_global_is_shared() {
        assert!(std::ptr::eq(Registry::global(), Registry::global()));
        assert!(Registry::global().has_kind("integer"));
    }
}
