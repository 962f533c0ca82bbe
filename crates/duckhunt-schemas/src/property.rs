//! Properties: the unit that decides whether one value conforms
//!
//! Leaf properties pair a type check with an ordered set of validators.
//! Hash and array schemas also implement [`Property`] so they can be nested
//! inside each other.
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

use crate::error::{SchemaError, SchemaResult};
use crate::options::Options;
use crate::registry::Registry;
use crate::report::{
    ErrorMap, FieldErrors, NIL_OBJECT_NOT_ALLOWED_MESSAGE, REQUIRED_MESSAGE,
    TYPE_MISMATCH_MESSAGE,
};
use crate::validators::Validator;
use crate::value;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Anything that can validate a single value inside a schema
pub trait Property: fmt::Debug + Send + Sync {
    /// Kind name this property was registered under
    fn kind(&self) -> &str;

    /// Whether the owning hash schema must see this key
    fn is_required(&self) -> bool;

    /// Whether a null value is accepted
    fn allows_nil(&self) -> bool;

    /// Validate a present value. An empty result means the value conforms.
    fn check(&self, value: &Value) -> SchemaResult<FieldErrors>;

    /// Errors reported when a required key is absent from its hash
    fn missing(&self) -> FieldErrors {
        FieldErrors::message(REQUIRED_MESSAGE)
    }
}

/// Type predicate for a leaf kind
pub type TypeMatcher = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Builtin leaf kinds and their type predicates
pub fn builtin_matchers() -> Vec<(&'static str, TypeMatcher)> {
    vec![
        ("string", Arc::new(|v: &Value| v.is_string()) as TypeMatcher),
        ("integer", Arc::new(value::is_integer) as TypeMatcher),
        ("float", Arc::new(value::is_float) as TypeMatcher),
        ("number", Arc::new(|v: &Value| v.is_number()) as TypeMatcher),
        ("boolean", Arc::new(|v: &Value| v.is_boolean()) as TypeMatcher),
        ("nil", Arc::new(|v: &Value| v.is_null()) as TypeMatcher),
    ]
}

/// A scalar property: type check plus attached validators
pub struct LeafProperty {
    kind: String,
    matcher: TypeMatcher,
    required: bool,
    allow_nil: bool,
    validators: Vec<Box<dyn Validator>>,
}

impl LeafProperty {
    /// A property with no validators
    pub fn new(kind: impl Into<String>, matcher: TypeMatcher) -> Self {
        Self {
            kind: kind.into(),
            matcher,
            required: true,
            allow_nil: false,
            validators: Vec::new(),
        }
    }

    /// Build from options: `required` and `allow_nil` are consumed, every
    /// other option names a validator resolved through the registry
    pub fn from_options(
        kind: impl Into<String>,
        matcher: TypeMatcher,
        mut options: Options,
        registry: &Registry,
    ) -> SchemaResult<Self> {
        let mut property = Self::new(kind, matcher);
        property.required = options.take_bool("required", true)?;
        property.allow_nil = options.take_bool("allow_nil", false)?;

        for (name, config) in options {
            let validator = registry.build_validator(&name, &config)?;
            property.add_validator(validator)?;
        }
        Ok(property)
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn allow_nil(mut self, allow_nil: bool) -> Self {
        self.allow_nil = allow_nil;
        self
    }

    /// Attach a validator; each validator name may appear once
    pub fn add_validator(&mut self, validator: Box<dyn Validator>) -> SchemaResult<()> {
        if self.validator(validator.name()).is_some() {
            return Err(SchemaError::ValidatorAlreadyDefined {
                name: validator.name().to_string(),
            });
        }
        self.validators.push(validator);
        Ok(())
    }

    /// Builder-style [`LeafProperty::add_validator`]
    pub fn with_validator(mut self, validator: impl Validator + 'static) -> SchemaResult<Self> {
        self.add_validator(Box::new(validator))?;
        Ok(self)
    }

    pub fn validator(&self, name: &str) -> Option<&dyn Validator> {
        self.validators
            .iter()
            .find(|v| v.name() == name)
            .map(|v| v.as_ref())
    }

    pub fn validators(&self) -> impl Iterator<Item = &dyn Validator> {
        self.validators.iter().map(|v| v.as_ref())
    }

    /// Whether the value has this property's type, ignoring validators
    pub fn matches_type(&self, value: &Value) -> bool {
        (self.matcher)(value)
    }
}

impl fmt::Debug for LeafProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeafProperty")
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("allow_nil", &self.allow_nil)
            .field("validators", &self.validators)
            .finish()
    }
}

impl Property for LeafProperty {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn is_required(&self) -> bool {
        self.required
    }

    fn allows_nil(&self) -> bool {
        self.allow_nil
    }

    fn check(&self, value: &Value) -> SchemaResult<FieldErrors> {
        if value.is_null() && (self.allow_nil || self.matches_type(value)) {
            return Ok(FieldErrors::none());
        }
        if value.is_null() {
            return Ok(FieldErrors::message(NIL_OBJECT_NOT_ALLOWED_MESSAGE));
        }
        if !self.matches_type(value) {
            trace!(kind = %self.kind, found = value::kind_name(value), "type mismatch");
            return Ok(FieldErrors::message(TYPE_MISMATCH_MESSAGE));
        }

        let mut messages: Vec<String> = Vec::new();
        for validator in &self.validators {
            if !validator.valid(value)? {
                let message = validator.error_message();
                if !messages.iter().any(|m| m == message) {
                    messages.push(message.to_string());
                }
            }
        }
        Ok(FieldErrors::Messages(messages))
    }
}

/// Wrap a container's error map as the errors of a nested property
pub(crate) fn nested(errors: ErrorMap) -> FieldErrors {
    if errors.is_empty() {
        FieldErrors::none()
    } else {
        FieldErrors::Nested(errors)
    }
}

/// `{"base": ["required"]}`, reported for an absent nested container
pub(crate) fn missing_container() -> FieldErrors {
    FieldErrors::Nested(ErrorMap::with_base(REQUIRED_MESSAGE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{AllowBlank, Divisibility, Ordering, OrderingOp};
    use serde_json::json;

    fn leaf(kind: &str) -> LeafProperty {
        let matcher = builtin_matchers()
            .into_iter()
            .find(|(name, _)| *name == kind)
            .map(|(_, matcher)| matcher)
            .unwrap();
        LeafProperty::new(kind, matcher)
    }

    fn messages(errors: FieldErrors) -> Vec<String> {
        errors.as_messages().unwrap().to_vec()
    }

    #[test]
    fn test_type_checks() {
        assert!(leaf("string").check(&json!("hi")).unwrap().is_empty());
        assert!(leaf("integer").check(&json!(3)).unwrap().is_empty());
        assert!(leaf("float").check(&json!(3.5)).unwrap().is_empty());
        assert!(leaf("number").check(&json!(3)).unwrap().is_empty());
        assert!(leaf("number").check(&json!(3.5)).unwrap().is_empty());
        assert!(leaf("boolean").check(&json!(false)).unwrap().is_empty());

        assert_eq!(messages(leaf("float").check(&json!(3)).unwrap()), vec!["wrong type"]);
        assert_eq!(messages(leaf("integer").check(&json!(3.0)).unwrap()), vec!["wrong type"]);
        assert_eq!(messages(leaf("string").check(&json!(1)).unwrap()), vec!["wrong type"]);
        assert_eq!(messages(leaf("boolean").check(&json!("true")).unwrap()), vec!["wrong type"]);
    }

    #[test]
    fn test_nil_handling() {
        let strict = leaf("string");
        assert_eq!(
            messages(strict.check(&Value::Null).unwrap()),
            vec!["nil object not allowed"]
        );

        let lenient = leaf("string").allow_nil(true);
        assert!(lenient.check(&Value::Null).unwrap().is_empty());

        let nil = leaf("nil");
        assert!(nil.check(&Value::Null).unwrap().is_empty());
        assert_eq!(messages(nil.check(&json!(0)).unwrap()), vec!["wrong type"]);
    }

    #[test]
    fn test_type_mismatch_skips_validators() {
        let property = leaf("integer")
            .with_validator(Divisibility::divisible_by(&json!(3)).unwrap())
            .unwrap();
        assert_eq!(messages(property.check(&json!("abc")).unwrap()), vec!["wrong type"]);
        assert_eq!(
            messages(property.check(&json!(4)).unwrap()),
            vec!["not divisible by `3`"]
        );
    }

    #[test]
    fn test_validators_run_in_order() {
        let property = leaf("integer")
            .with_validator(Ordering::new(OrderingOp::GreaterThan, &json!(10)).unwrap())
            .unwrap()
            .with_validator(Divisibility::divisible_by(&json!(3)).unwrap())
            .unwrap();
        assert_eq!(
            messages(property.check(&json!(4)).unwrap()),
            vec!["less than `10`", "not divisible by `3`"]
        );
    }

    #[test]
    fn test_duplicate_messages_collapse() {
        let property = leaf("integer")
            .with_validator(Ordering::new(OrderingOp::GreaterThan, &json!(3)).unwrap())
            .unwrap()
            .with_validator(Ordering::new(OrderingOp::GreaterThanOrEqualTo, &json!(3)).unwrap())
            .unwrap();
        assert_eq!(messages(property.check(&json!(1)).unwrap()), vec!["less than `3`"]);
    }

    #[test]
    fn test_validator_defined_twice() {
        let err = leaf("string")
            .with_validator(AllowBlank::new(false))
            .unwrap()
            .with_validator(AllowBlank::new(true))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::ValidatorAlreadyDefined {
                name: "allow_blank".to_string()
            }
        );
    }

    #[test]
    fn test_from_options() {
        let registry = Registry::default();
        let options = Options::new()
            .with("required", false)
            .with("allowNil", true)
            .with("less_than", 5);
        let property =
            LeafProperty::from_options("integer", leaf("integer").matcher, options, &registry)
                .unwrap();
        assert!(!property.is_required());
        assert!(property.allows_nil());
        assert!(property.validator("less_than").is_some());
        assert_eq!(messages(property.check(&json!(7)).unwrap()), vec!["greater than `5`"]);
    }

    #[test]
    fn test_unknown_option_is_an_unknown_validator() {
        let registry = Registry::default();
        let options = Options::new().with("shorter_than", 5);
        let err = LeafProperty::from_options("string", leaf("string").matcher, options, &registry)
            .unwrap_err();
        assert!(matches!(err, SchemaError::UnknownValidator { .. }));
    }

    #[test]
    fn test_missing_leaf() {
        assert_eq!(messages(leaf("string").missing()), vec!["required"]);
    }
}
