//! Logging setup for Intelligent Data Pro navigation tools
//!
//! A thin builder over `tracing-subscriber`: an `EnvFilter` (honoring
//! `RUST_LOG`), a console layer in pretty or JSON lines format, and optional
//! JSON lines file output through `tracing-appender`.
//!
//! ```ignore
//! use idp_logging::{IdpSubscriberBuilder, LogConfig};
//!
//! let _guard = IdpSubscriberBuilder::new()
//!     .with_config(LogConfig::development())
//!     .init()?;
//! ```

pub mod config;

pub use config::{ConsoleConfig, FileConfig, JsonlConfig, LogConfig, RotationStrategy};

use std::fs::{self, File};

use thiserror::Error;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt};

/// Errors raised while installing the subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to open log file: {0}")]
    File(#[from] std::io::Error),

    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("A global subscriber is already installed: {0}")]
    AlreadyInitialized(String),
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Builder for the global tracing subscriber
///
/// Defaults to JSON lines on the console. Use [`LogConfig::development`] for
/// human-readable output.
#[derive(Debug, Default)]
pub struct IdpSubscriberBuilder {
    config: LogConfig,
}

impl IdpSubscriberBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.config.default_level = level.into();
        self
    }

    pub fn with_console(mut self, enabled: bool) -> Self {
        self.config.console.enabled = enabled;
        self
    }

    pub fn with_file_output(mut self, config: FileConfig) -> Self {
        self.config.file = Some(config);
        self
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Install the subscriber globally.
    ///
    /// The returned guard flushes file output on drop and must live as long
    /// as the program logs.
    pub fn init(self) -> Result<Option<WorkerGuard>, LoggingError> {
        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(&self.config.default_level)
                .map_err(|e| LoggingError::Filter(e.to_string()))?,
        };

        let mut layers: Vec<BoxedLayer> = Vec::new();
        if self.config.console.enabled {
            layers.push(self.console_layer());
        }

        let guard = match &self.config.file {
            Some(file_config) => {
                let (writer, guard) = file_writer(file_config)?;
                layers.push(json_layer(&self.config.jsonl, writer));
                Some(guard)
            }
            None => None,
        };

        Registry::default()
            .with(layers)
            .with(filter)
            .try_init()
            .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

        Ok(guard)
    }

    fn console_layer(&self) -> BoxedLayer {
        if self.config.console.pretty {
            tracing_subscriber::fmt::layer()
                .with_ansi(self.config.console.ansi)
                .with_target(true)
                .boxed()
        } else {
            json_layer(&self.config.jsonl, std::io::stdout)
        }
    }
}

fn json_layer<W>(jsonl: &JsonlConfig, writer: W) -> BoxedLayer
where
    W: for<'w> tracing_subscriber::fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(jsonl.include_spans)
        .flatten_event(jsonl.flatten_events)
        .with_file(jsonl.include_location)
        .with_line_number(jsonl.include_location)
        .with_writer(writer)
        .boxed()
}

/// Rolling appender, or a truncated single file for [`RotationStrategy::Never`].
fn file_writer(config: &FileConfig) -> Result<(NonBlocking, WorkerGuard), LoggingError> {
    fs::create_dir_all(&config.directory)?;
    let rotation = match config.rotation {
        RotationStrategy::Daily => Rotation::DAILY,
        RotationStrategy::Hourly => Rotation::HOURLY,
        RotationStrategy::Never => {
            let path = config.directory.join(format!("{}.log", config.prefix));
            return Ok(tracing_appender::non_blocking(File::create(path)?));
        }
    };
    let appender = RollingFileAppender::new(rotation, &config.directory, &config.prefix);
    Ok(tracing_appender::non_blocking(appender))
}
