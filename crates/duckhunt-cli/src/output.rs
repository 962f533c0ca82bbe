//! Output formatting and writing utilities
//!
//! Reports are written to stdout in one of the formats selected with
//! `--output`. Human output is colored when the terminal supports it;
//! machine formats are emitted as-is.
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use duckhunt_schemas::{BatchReport, DocumentResult};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use tracing::trace;

/// Validation results for one document file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub report: BatchReport,
}

/// Results of a whole `validate` run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub schema: PathBuf,
    pub valid: bool,
    pub checked: usize,
    pub failures: usize,
    pub files: Vec<FileReport>,
}

impl RunSummary {
    pub fn new(schema: PathBuf, files: Vec<FileReport>) -> Self {
        let checked = files.iter().map(|f| f.report.checked()).sum();
        let failures = files.iter().map(|f| f.report.failure_count()).sum();
        let valid = files.iter().all(|f| f.report.is_valid());
        Self {
            schema,
            valid,
            checked,
            failures,
            files,
        }
    }
}

/// Formats values for the selected output format
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format the results of a validation run
    fn format_summary(&self, summary: &RunSummary, tree: bool) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // no dedicated human layout; pretty JSON reads well enough
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_summary(&self, summary: &RunSummary, tree: bool) -> Result<String> {
        match self {
            OutputFormat::Human => format_summary_human(summary, tree),
            _ => self.format(summary),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, progress: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: progress
                && !quiet
                && format == OutputFormat::Human
                && io::stdout().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            show_progress: false, // No progress bars with custom writers
            quiet,
            writer,
        }
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write an error message
    pub fn error(&mut self, message: &str) -> Result<()> {
        if !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.red().to_string())
        } else {
            self.writeln(&format!("ERROR: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        self.document(&formatted)
    }

    fn document(&mut self, formatted: &str) -> Result<()> {
        trace!(bytes = formatted.len(), "writing data");

        if self.is_human() {
            self.writeln(formatted)
        } else {
            self.write(formatted)?;
            // JSON has no trailing newline; YAML already ends with one
            if !formatted.ends_with('\n') {
                self.writeln("")?;
            }
            Ok(())
        }
    }

    /// Write the results of a validation run
    ///
    /// Quiet mode still reports failures.
    pub fn summary(&mut self, summary: &RunSummary, tree: bool) -> Result<()> {
        if !self.is_human() {
            let formatted = self.format.format_summary(summary, tree)?;
            return self.document(&formatted);
        }

        for (tone, line) in summary_lines(summary, tree)? {
            match tone {
                Tone::Valid => self.success(&line)?,
                Tone::Invalid => self.error(&line)?,
                Tone::Stopped => self.warning(&line)?,
                Tone::Detail => self.writeln(&line)?,
                Tone::Totals if self.quiet => {}
                Tone::Totals => self.writeln(&line)?,
            }
        }
        Ok(())
    }

    /// Write a table (human format only)
    pub fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        if !self.is_human() {
            return Ok(());
        }

        let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }

        let header_row = headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
            .collect::<Vec<_>>()
            .join(" │ ");

        if self.use_color {
            self.writeln(&header_row.bold().to_string())?;
        } else {
            self.writeln(&header_row)?;
        }

        let separator = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        self.writeln(&separator)?;

        for row in rows {
            let row_str = row
                .iter()
                .enumerate()
                .map(|(i, cell)| match widths.get(i) {
                    Some(width) => format!("{:width$}", cell, width = width),
                    None => cell.clone(),
                })
                .collect::<Vec<_>>()
                .join(" │ ");
            self.writeln(row_str.trim_end())?;
        }

        Ok(())
    }

    /// Create a progress bar for long operations
    pub fn progress_bar(&self, length: u64, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new(length);
        if let Ok(style) = default_progress_style() {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        Some(pb)
    }
}

/// Helper function to create a progress bar style
pub fn default_progress_style() -> std::result::Result<ProgressStyle, indicatif::style::TemplateError> {
    Ok(ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
        .progress_chars("#>-"))
}

/// How a line of the human summary is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Valid,
    Invalid,
    Stopped,
    Detail,
    Totals,
}

/// Format a whole run for human reading (without color)
fn format_summary_human(summary: &RunSummary, tree: bool) -> Result<String> {
    Ok(summary_lines(summary, tree)?
        .into_iter()
        .map(|(_, line)| line + "\n")
        .collect())
}

fn summary_lines(summary: &RunSummary, tree: bool) -> Result<Vec<(Tone, String)>> {
    let mut lines = Vec::new();

    for file in &summary.files {
        let report = &file.report;
        if report.is_valid() {
            lines.push((
                Tone::Valid,
                format!("✓ {}: {} document(s) valid", file.path.display(), report.checked()),
            ));
            continue;
        }

        lines.push((
            Tone::Invalid,
            format!(
                "✗ {}: {} of {} document(s) invalid",
                file.path.display(),
                report.failure_count(),
                report.checked()
            ),
        ));
        for result in report.failures() {
            lines.push((Tone::Detail, format!("  document {}", result.index)));
            for line in document_error_lines(result, tree)? {
                lines.push((Tone::Detail, format!("    {}", line)));
            }
        }
        if report.stopped_early {
            lines.push((
                Tone::Stopped,
                format!(
                    "  stopped after {} of {} document(s)",
                    report.checked(),
                    report.total
                ),
            ));
        }
    }

    lines.push((Tone::Totals, format_totals(summary)));
    Ok(lines)
}

fn document_error_lines(result: &DocumentResult, tree: bool) -> Result<Vec<String>> {
    let errors = result.validation.errors();
    if tree {
        let pretty = serde_json::to_string_pretty(errors)?;
        return Ok(pretty.lines().map(str::to_string).collect());
    }

    Ok(errors
        .violations()
        .iter()
        .map(|violation| violation.to_string())
        .collect())
}

fn format_totals(summary: &RunSummary) -> String {
    format!(
        "Checked {} document(s) in {} file(s): {} invalid",
        summary.checked,
        summary.files.len(),
        summary.failures
    )
}

#[cfg(test)]
pub(crate) mod capture {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    /// A writer whose contents can be inspected after the OutputWriter is done
    #[derive(Clone, Default)]
    pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        pub fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }
}
