//! Loading schema definitions and documents from files

use duckhunt_schemas::loader::{self, LoaderError};
use duckhunt_schemas::{validate_batch, BatchConfig, Registry, SchemaDefinition, SchemaError};
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::{tempdir, TempDir};

const PERSON_YAML: &str = r#"
type: hash
properties:
  name:
    type: string
    allow_blank: false
  age:
    type: integer
    greater_than_or_equal_to: 0
    required: false
  tags:
    type: array
    required: false
    validates_uniqueness: true
    element: string
  position:
    type: array
    required: false
    items: [number, number]
    optional_items: [number]
"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[cfg(test)]
mod schema_files {
    use super::*;

    #[test]
    fn test_yaml_schema() {
        let dir = tempdir().unwrap();
        let path = write(&dir, "person.yaml", PERSON_YAML);
        let schema = loader::load_schema(&path).unwrap();

        assert_eq!(schema.kind(), "nested_hash");
        let hash = schema.as_hash().unwrap();
        assert_eq!(
            hash.property_names().collect::<Vec<_>>(),
            ["name", "age", "tags", "position"]
        );

        assert!(schema
            .is_valid(&json!({"name": "Ada", "tags": ["a", "b"], "position": [1, 2.5]}))
            .unwrap());

        let validation = schema
            .validate(&json!({"name": " ", "age": -1, "tags": ["a", "a"], "position": [1]}))
            .unwrap();
        assert_eq!(
            validation.errors().to_json(),
            json!({
                "name": ["blank values not allowed"],
                "age": ["less than `0`"],
                "tags": {"base": ["duplicate items are not allowed"]},
                "position": {"base": ["expected at least 2 item(s) but got 1 item(s)"]}
            })
        );
    }

    #[test]
    fn test_json_array_schema() {
        let dir = tempdir().unwrap();
        let path = write(
            &dir,
            "scores.json",
            r#"{"type": "array", "min_size": 1, "element": {"type": "integer", "less_than": 100}}"#,
        );
        let schema = loader::load_schema(&path).unwrap();

        assert!(schema.as_array().is_some());
        assert!(schema.is_valid(&json!([1, 99])).unwrap());
        assert_eq!(
            schema.validate(&json!([1, 100])).unwrap().errors().to_json(),
            json!({"1": ["greater than `100`"]})
        );
    }

    #[test]
    fn test_invalid_definition_names_the_path() {
        let dir = tempdir().unwrap();
        let path = write(
            &dir,
            "bad.yaml",
            "type: hash\nproperties:\n  age:\n    type: integer\n    divisible_by: 0\n",
        );

        let err = loader::load_schema(&path).unwrap_err();
        match err {
            LoaderError::DefinitionError { source, .. } => match source {
                SchemaError::InvalidDefinition { path, .. } => {
                    assert_eq!(path, "$.properties.age")
                }
                other => panic!("unexpected error: {other}"),
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_top_level_must_be_a_container() {
        let dir = tempdir().unwrap();
        let path = write(&dir, "leaf.json", r#"{"type": "string"}"#);
        let err = loader::load_schema(&path).unwrap_err();
        assert!(matches!(err, LoaderError::DefinitionError { .. }));
    }

    #[test]
    fn test_unsupported_and_missing_files() {
        let dir = tempdir().unwrap();
        let path = write(&dir, "schema.toml", "type = 'hash'");
        assert!(matches!(
            loader::load_schema(&path).unwrap_err(),
            LoaderError::UnsupportedFormat { .. }
        ));

        let missing = dir.path().join("missing.yaml");
        assert!(matches!(
            loader::load_schema(&missing).unwrap_err(),
            LoaderError::IoError { .. }
        ));
    }

    #[test]
    fn test_custom_registry() {
        let mut registry = Registry::default();
        registry.register_leaf_kind(
            "email",
            Arc::new(|value: &Value| value.as_str().is_some_and(|s| s.contains('@'))),
        );

        let dir = tempdir().unwrap();
        let path = write(
            &dir,
            "contact.yaml",
            "type: object\nproperties:\n  email: email\n",
        );

        assert!(loader::load_schema(&path).is_err());

        let schema = loader::load_schema_with(&path, &registry).unwrap();
        assert!(schema.is_valid(&json!({"email": "ada@example.com"})).unwrap());
        assert!(!schema.is_valid(&json!({"email": "ada"})).unwrap());
    }
}

#[cfg(test)]
mod document_files {
    use super::*;

    #[test]
    fn test_batch_over_yaml_stream() {
        let dir = tempdir().unwrap();
        let schema_path = write(&dir, "person.yaml", PERSON_YAML);
        let docs_path = write(
            &dir,
            "people.yaml",
            "name: Ada\n---\nname: ''\n---\nname: Cy\nage: 3\n",
        );

        let schema = loader::load_schema(&schema_path).unwrap();
        let documents = loader::load_documents(&docs_path).unwrap();
        assert_eq!(documents.len(), 3);

        let report = validate_batch(&schema, &documents, &BatchConfig::default()).unwrap();
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.failures().next().unwrap().index, 1);
    }

    #[test]
    fn test_json_lines() {
        let dir = tempdir().unwrap();
        let path = write(&dir, "events.jsonl", "{\"a\": 1}\n{\"a\": 2}\n\n");
        let documents = loader::load_documents(&path).unwrap();
        assert_eq!(documents, vec![json!({"a": 1}), json!({"a": 2})]);
    }

    #[test]
    fn test_definition_from_value() {
        let dir = tempdir().unwrap();
        let path = write(&dir, "flags.json", r#"{"type": "array", "element": "boolean"}"#);
        let definition = loader::load_value(&path).unwrap();

        let schema = SchemaDefinition::build(&definition, Registry::global()).unwrap();
        assert!(schema.is_valid(&json!([true, false])).unwrap());
        assert!(!schema.is_valid(&json!([true, 0])).unwrap());
    }
}
