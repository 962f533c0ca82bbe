//! Logging setup for the duckhunt CLI
//!
//! Logs go to stderr so that validation reports on stdout stay machine
//! readable. Levels come from `-v` (or the config file), `RUST_LOG`
//! overrides everything, and `DUCKHUNT_LOG_FORMAT` picks compact, full or
//! JSON lines.
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

use crate::config;
use crate::error::{Error, Result};
use std::io::IsTerminal;
use tracing::{field, Span};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

const FORMAT_ENV: &str = "DUCKHUNT_LOG_FORMAT";

/// Effective logging settings after merging flags, file and environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `warn` or `duckhunt_schemas=trace`
    pub level: String,
    pub format: LogFormat,
    pub thread_ids: bool,
    /// Include file and line numbers
    pub source_location: bool,
    /// Emit span close events, which carry durations
    pub span_events: bool,
}

/// Log line layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Full,
    Json,
}

impl LogFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "compact" => Some(Self::Compact),
            "full" => Some(Self::Full),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
            thread_ids: false,
            source_location: false,
            span_events: false,
        }
    }
}

impl LoggingConfig {
    /// Settings for a `-v` count
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        let tracing_everything = verbosity >= 3;

        Self {
            level: level.to_string(),
            format: if tracing_everything {
                LogFormat::Full
            } else {
                LogFormat::Compact
            },
            thread_ids: tracing_everything,
            source_location: verbosity >= 2,
            span_events: tracing_everything,
        }
    }

    /// Apply the `logging` section of the configuration file
    ///
    /// The file level only applies when no `-v` flag raised the level.
    pub fn merge_with_file(&mut self, file: &config::LoggingConfig, verbosity: u8) {
        if verbosity == 0 {
            if let Some(level) = &file.level {
                self.level = level.clone();
            }
        }
        if let Some(format) = file.format.as_deref().and_then(LogFormat::from_name) {
            self.format = format;
        }
    }

    /// Apply `RUST_LOG` and `DUCKHUNT_LOG_FORMAT`
    pub fn merge_with_env(&mut self) {
        if let Ok(directive) = std::env::var("RUST_LOG") {
            self.level = directive;
        }

        if let Ok(name) = std::env::var(FORMAT_ENV) {
            match LogFormat::from_name(&name) {
                Some(format) => self.format = format,
                // no subscriber yet, so this cannot go through tracing
                None => eprintln!("Ignoring unknown {} `{}`", FORMAT_ENV, name),
            }
        }
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// Install the global subscriber
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| Error::config(format!("invalid log level `{}`: {}", config.level, e)))?;

    let base = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_thread_ids(config.thread_ids)
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .with_span_events(config.span_events());

    let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Compact => base
            .with_ansi(std::io::stderr().is_terminal())
            .compact()
            .boxed(),
        LogFormat::Full => base.with_ansi(std::io::stderr().is_terminal()).boxed(),
        LogFormat::Json => base.with_ansi(false).json().boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()
        .map_err(|e| Error::other(format!("Failed to initialize logging: {}", e)))?;

    tracing::debug!(config = ?config, "logging initialized");
    Ok(())
}

/// Span covering one timed operation; `duration_ms` is filled in on drop
pub fn create_operation_span(operation: &str, details: Option<&str>) -> Span {
    tracing::info_span!(
        "operation",
        operation,
        details = details.unwrap_or_default(),
        duration_ms = field::Empty,
    )
}

pub mod timing {
    use std::time::{Duration, Instant};
    use tracing::Span;

    /// Logs how long an operation took when dropped
    pub struct Timer {
        operation: String,
        span: Span,
        started: Instant,
    }

    impl Timer {
        pub fn new(operation: &str) -> Self {
            Self::start(operation, None)
        }

        pub fn with_details(operation: &str, details: &str) -> Self {
            Self::start(operation, Some(details))
        }

        fn start(operation: &str, details: Option<&str>) -> Self {
            Self {
                operation: operation.to_owned(),
                span: super::create_operation_span(operation, details),
                started: Instant::now(),
            }
        }

        pub fn elapsed(&self) -> Duration {
            self.started.elapsed()
        }
    }

    impl Drop for Timer {
        fn drop(&mut self) {
            let millis = self.started.elapsed().as_millis() as u64;
            self.span.record("duration_ms", millis);
            tracing::debug!(operation = %self.operation, duration_ms = millis, "operation completed");
        }
    }
}
