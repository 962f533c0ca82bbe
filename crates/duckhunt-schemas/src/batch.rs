//! Validating many documents against one schema
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

use crate::error::SchemaResult;
use crate::report::Validation;
use crate::schemas::Schema;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Validation configuration for batch operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchConfig {
    /// Whether to stop at the first invalid document
    pub fail_fast: bool,
    /// Maximum number of invalid documents to collect (0 = unlimited)
    pub max_failures: usize,
}

impl BatchConfig {
    /// Enable fail-fast mode
    pub fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Set maximum number of invalid documents to collect
    pub fn with_max_failures(mut self, max_failures: usize) -> Self {
        self.max_failures = max_failures;
        self
    }

    /// Whether a run with this many invalid documents should stop
    pub fn should_stop(&self, failures: usize) -> bool {
        (self.fail_fast && failures > 0) || (self.max_failures > 0 && failures >= self.max_failures)
    }
}

/// Result of validating one document in a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentResult {
    /// Position of the document in the batch
    pub index: usize,
    pub valid: bool,
    #[serde(flatten)]
    pub validation: Validation,
}

/// Results of a batch, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub results: Vec<DocumentResult>,
    /// Number of documents submitted
    pub total: usize,
    /// Whether validation stopped before every document was checked
    pub stopped_early: bool,
}

impl BatchReport {
    /// True when every checked document is valid and none were skipped
    pub fn is_valid(&self) -> bool {
        !self.stopped_early && self.results.iter().all(|r| r.valid)
    }

    pub fn checked(&self) -> usize {
        self.results.len()
    }

    pub fn failures(&self) -> impl Iterator<Item = &DocumentResult> {
        self.results.iter().filter(|r| !r.valid)
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}

/// Validate each document, honoring the fail-fast and failure limits
pub fn validate_batch(
    schema: &Schema,
    documents: &[Value],
    config: &BatchConfig,
) -> SchemaResult<BatchReport> {
    let mut report = BatchReport {
        total: documents.len(),
        ..BatchReport::default()
    };
    let mut failures = 0;

    for (index, document) in documents.iter().enumerate() {
        let validation = schema.validate(document)?;
        let valid = validation.is_valid();
        if !valid {
            failures += 1;
        }
        report.results.push(DocumentResult {
            index,
            valid,
            validation,
        });

        if config.should_stop(failures) {
            report.stopped_early = index + 1 < documents.len();
            break;
        }
    }

    debug!(
        total = report.total,
        checked = report.checked(),
        failures,
        "batch validation finished"
    );
    Ok(report)
}
