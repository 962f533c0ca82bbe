//! Property-based tests for schema validation
//!
//! These tests check that validation behaves consistently across a wide
//! range of inputs.

use duckhunt_schemas::{ArraySchema, HashSchema, Options, Registry, Schema};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::HashSet;

/// Strategy for generating random JSON values with controlled complexity
fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        (-1.0e6f64..1.0e6).prop_map(|f| json!(f)),
        "[a-zA-Z0-9 ]{0,50}".prop_map(Value::String),
    ];

    leaf.prop_recursive(
        3,  // max depth
        10, // max size
        5,  // items per collection
        |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
                proptest::collection::hash_map("[a-z_]{1,8}", inner, 0..5)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        },
    )
}

/// A schema touching every builtin kind and most validators
fn profile_schema() -> Schema {
    HashSchema::define(|s| {
        s.string(
            "name",
            Options::new().with("allow_blank", false).with("less_than", 40),
        )?;
        s.integer(
            "age",
            Options::new()
                .with("required", false)
                .with("greater_than_or_equal_to", 0),
        )?;
        s.float("score", Options::new().with("required", false))?;
        s.boolean("admin", Options::new().with("required", false))?;
        s.array(
            "tags",
            Options::new()
                .with("required", false)
                .with("validates_uniqueness", true)
                .with("max_size", 3),
            |a| a.string(Options::new().with("matches", "^[a-z]+$")),
        )?;
        s.nested_hash("address", Options::new().with("allow_nil", true), |h| {
            h.string("city", Options::new())?;
            h.array("point", Options::new().with("required", false), |a| {
                a.items(|t| {
                    t.number(Options::new())?;
                    t.number(Options::new())
                })
            })
        })
    })
    .expect("schema definition should succeed")
    .into()
}

proptest! {
    /// Validation never panics and never reports a defect for any JSON input
    #[test]
    fn prop_validation_never_fails_on_any_input(input in json_value_strategy()) {
        let schema = profile_schema();
        let result = schema.validate(&input);
        prop_assert!(result.is_ok(), "unexpected error: {:?}", result);
    }

    /// Validation is deterministic and leaves no state behind
    #[test]
    fn prop_validation_deterministic(
        first in json_value_strategy(),
        second in json_value_strategy(),
    ) {
        let schema = profile_schema();

        let before = schema.validate(&second).unwrap();
        let _ = schema.validate(&first).unwrap();
        let after = schema.validate(&second).unwrap();

        prop_assert_eq!(before, after);
    }

    /// Anything other than an object is rejected with a single base error
    #[test]
    fn prop_non_objects_are_wrong_type(input in json_value_strategy()) {
        prop_assume!(!input.is_object() && !input.is_null());
        let schema = profile_schema();
        let validation = schema.validate(&input).unwrap();
        prop_assert_eq!(validation.errors().to_json(), json!({"base": ["wrong type"]}));
    }

    /// Size bounds decide validity exactly
    #[test]
    fn prop_array_bounds(
        min in 0usize..6,
        extra in 0usize..4,
        items in proptest::collection::vec(any::<i32>(), 0..12),
    ) {
        let max = min + extra;
        let schema = ArraySchema::define_with(
            Registry::global(),
            Options::new().with("min_size", min).with("max_size", max),
            |a| a.integer(Options::new()),
        ).unwrap();

        let expected = items.len() >= min && items.len() <= max;
        prop_assert_eq!(schema.is_valid(&json!(items)).unwrap(), expected);
    }

    /// Uniqueness agrees with set semantics
    #[test]
    fn prop_uniqueness(items in proptest::collection::vec(0i64..8, 0..8)) {
        let schema = ArraySchema::define_with(
            Registry::global(),
            Options::new().with("validates_uniqueness", true),
            |a| a.integer(Options::new()),
        ).unwrap();

        let distinct = items.iter().collect::<HashSet<_>>().len() == items.len();
        prop_assert_eq!(schema.is_valid(&json!(items)).unwrap(), distinct);
    }

    /// Every missing required property is reported, and only those
    #[test]
    fn prop_missing_required_properties(present in proptest::collection::vec(any::<bool>(), 4)) {
        let names = ["a", "b", "c", "d"];
        let schema = HashSchema::define(|s| {
            for name in names {
                s.integer(name, Options::new())?;
            }
            Ok(())
        }).unwrap();

        let input: serde_json::Map<String, Value> = names
            .iter()
            .zip(&present)
            .filter(|(_, present)| **present)
            .map(|(name, _)| (name.to_string(), json!(1)))
            .collect();
        let validation = schema.validate(&Value::Object(input)).unwrap();

        for (name, present) in names.iter().zip(&present) {
            if *present {
                prop_assert!(!validation.errors().contains_key(name));
            } else {
                prop_assert_eq!(validation.errors().messages(name).unwrap(), ["required"]);
            }
        }
    }

    /// Divisibility matches integer remainder
    #[test]
    fn prop_divisible_by(n in -10_000i64..10_000, d in 1i64..50) {
        let schema = ArraySchema::define(|a| {
            a.integer(Options::new().with("divisible_by", d))
        }).unwrap();
        prop_assert_eq!(schema.is_valid(&json!([n])).unwrap(), n % d == 0);
    }

    /// Comparisons on strings use the character count
    #[test]
    fn prop_string_length_comparison(text in "[a-z]{0,20}", bound in 0usize..20) {
        let schema = ArraySchema::define(|a| {
            a.string(Options::new().with("greater_than", bound))
        }).unwrap();
        prop_assert_eq!(schema.is_valid(&json!([text])).unwrap(), text.len() > bound);
    }
}
