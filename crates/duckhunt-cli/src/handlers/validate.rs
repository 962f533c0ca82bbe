//! Validate command handler
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

use super::ensure_exists;
use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::{FileReport, OutputWriter, RunSummary};
use duckhunt_schemas::{loader, validate_batch, BatchConfig};
use tracing::{debug, info, instrument, warn};

/// Handle the validate command
///
/// Failure limits apply across all files: once reached, the remaining
/// documents and files are skipped.
#[instrument(skip_all, fields(schema = %args.schema.display(), files = args.documents.len()))]
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details(
        "validate_command",
        &format!("schema: {}", args.schema.display()),
    );

    if args.fail_fast && args.max_failures.is_some() {
        return Err(Error::invalid_args(
            "--fail-fast and --max-failures cannot be combined",
        ));
    }

    ensure_exists(&args.schema)?;
    output.info(&format!("Loading schema: {}", args.schema.display()))?;
    let schema = {
        let _schema_timer = Timer::new("schema_loading");
        loader::load_schema(&args.schema)?
    };
    debug!(kind = schema.kind(), "schema loaded");

    let limits = config.batch_config(args.fail_fast, args.max_failures);
    let progress = output.progress_bar(args.documents.len() as u64, "validating");
    let mut files = Vec::with_capacity(args.documents.len());
    let mut failures = 0;

    for path in &args.documents {
        ensure_exists(path)?;
        let documents = loader::load_documents(path)?;

        // carry the remaining failure budget into this file
        let file_limits = BatchConfig {
            fail_fast: limits.fail_fast,
            max_failures: if limits.max_failures > 0 {
                limits.max_failures.saturating_sub(failures)
            } else {
                0
            },
        };
        let report = validate_batch(&schema, &documents, &file_limits)?;
        failures += report.failure_count();
        info!(
            file = %path.display(),
            checked = report.checked(),
            failures = report.failure_count(),
            "validated file"
        );
        files.push(FileReport {
            path: path.clone(),
            report,
        });

        if let Some(pb) = &progress {
            pb.inc(1);
        }
        if limits.should_stop(failures) {
            let skipped = args.documents.len() - files.len();
            if skipped > 0 {
                warn!(skipped, "failure limit reached, skipping remaining files");
            }
            break;
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let summary = RunSummary::new(args.schema.clone(), files);
    output.summary(&summary, args.tree)?;

    if summary.valid && summary.files.len() == args.documents.len() {
        Ok(())
    } else {
        Err(Error::ValidationFailed {
            failures: summary.failures,
            checked: summary.checked,
        })
    }
}
