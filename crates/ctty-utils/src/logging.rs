//! # Logging Utilities
//!
//! Logging infrastructure for ctty using `tracing`.
//!
//! - Pretty (development) or JSON (machine) output
//! - Filtering through `RUST_LOG`
//! - Optional daily-rolling log file
//!
//! Console output goes to **stderr**. The `ctty` binary prints its results on
//! stdout, and scripts parse that.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ctty_utils::init_logging;
//!
//! // Keep the guard alive until exit so file logs are flushed
//! let _guard = init_logging().expect("Failed to initialize logging");
//! tracing::info!("Application started");
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Filter directives (e.g., `RUST_LOG=debug`, `RUST_LOG=ctty_core=trace`)
//! - `CTTY_LOG_FORMAT`: Output format (`json` or `pretty`, default: `pretty`)
//! - `CTTY_LOG_FILE`: Optional path to a log file (rotated daily)

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{env, io};

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::{self};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Environment variable selecting the output format
pub const LOG_FORMAT_ENV: &str = "CTTY_LOG_FORMAT";

/// Environment variable naming an optional log file
pub const LOG_FILE_ENV: &str = "CTTY_LOG_FILE";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat
{
    /// Pretty-printed, human-readable format
    #[default]
    Pretty,
    /// JSON, one object per line
    Json,
}

impl LogFormat
{
    /// Format named by `CTTY_LOG_FORMAT`, `Pretty` if unset
    ///
    /// ## Errors
    ///
    /// [`LoggingError::InvalidFormat`] if the variable holds an unknown value.
    pub fn from_env() -> Result<Self, LoggingError>
    {
        match env::var(LOG_FORMAT_ENV) {
            Ok(s) => s.parse(),
            Err(_) => Ok(LogFormat::default()),
        }
    }
}

impl FromStr for LogFormat
{
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "pretty" | "dev" | "development" => Ok(LogFormat::Pretty),
            "json" | "prod" | "production" => Ok(LogFormat::Json),
            _ => Err(LoggingError::InvalidFormat(format!("{s}. Use 'pretty' or 'json'"))),
        }
    }
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel
{
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level
    Info,
    /// Debug level
    Debug,
    /// Trace level (most verbose)
    Trace,
}

impl From<LogLevel> for Level
{
    fn from(level: LogLevel) -> Self
    {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

impl FromStr for LogLevel
{
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "error" | "err" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(LoggingError::InvalidLevel(format!(
                "{s}. Use 'error', 'warn', 'info', 'debug', or 'trace'"
            ))),
        }
    }
}

/// Keeps the file writer running
///
/// Dropping the guard flushes and stops the background log-file writer.
/// Holds nothing when file logging is off.
#[must_use = "dropping the guard stops file logging"]
#[derive(Debug)]
pub struct LoggingGuard
{
    _file: Option<WorkerGuard>,
}

/// Initialize logging from the environment
///
/// Reads `RUST_LOG` (default `info`), `CTTY_LOG_FORMAT` and `CTTY_LOG_FILE`.
///
/// ## Errors
///
/// Returns an error if:
/// - Logging is already initialized
/// - `CTTY_LOG_FORMAT` has an unknown value
/// - `CTTY_LOG_FILE` has no file name
pub fn init_logging() -> Result<LoggingGuard, LoggingError>
{
    init_logging_internal(LogFormat::from_env()?, None)
}

/// Initialize logging with an explicit level and format
///
/// `level` overrides `RUST_LOG`; `None` falls back to it. `CTTY_LOG_FILE` is
/// still honoured.
///
/// ```rust,no_run
/// use ctty_utils::{LogFormat, LogLevel, init_logging_with_level};
///
/// let _guard = init_logging_with_level(Some(LogLevel::Debug), LogFormat::Pretty)
///     .expect("Failed to initialize logging");
/// ```
///
/// ## Errors
///
/// Returns an error if logging is already initialized or `CTTY_LOG_FILE` is
/// not a file path.
pub fn init_logging_with_level(level: Option<LogLevel>, format: LogFormat) -> Result<LoggingGuard, LoggingError>
{
    init_logging_internal(format, level.map(Into::into))
}

/// Build the filter
///
/// Priority:
/// 1. `explicit_level` (from a CLI flag)
/// 2. `RUST_LOG` (allows module filters like `ctty_core=trace`)
/// 3. INFO
fn build_filter(explicit_level: Option<Level>) -> EnvFilter
{
    if let Some(level) = explicit_level {
        return EnvFilter::new(level.to_string());
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()))
}

fn console_layer(format: LogFormat, filter: EnvFilter) -> BoxedLayer
{
    let layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_writer(io::stderr);

    match format {
        LogFormat::Pretty => layer.with_ansi(true).with_filter(filter).boxed(),
        LogFormat::Json => layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(filter)
            .boxed(),
    }
}

fn file_layer(format: LogFormat, filter: EnvFilter, path: &Path) -> Result<(BoxedLayer, WorkerGuard), LoggingError>
{
    let file_name = path
        .file_name()
        .ok_or_else(|| LoggingError::InitializationFailed(format!("{LOG_FILE_ENV} has no file name: {}", path.display())))?;
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));

    std::fs::create_dir_all(dir)?;
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, file_name));

    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_ansi(false); // No ANSI in files

    let layer = match format {
        LogFormat::Pretty => layer.with_filter(filter).boxed(),
        LogFormat::Json => layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(filter)
            .boxed(),
    };
    Ok((layer, guard))
}

fn init_logging_internal(format: LogFormat, explicit_level: Option<Level>) -> Result<LoggingGuard, LoggingError>
{
    let log_file = env::var(LOG_FILE_ENV).ok().map(PathBuf::from);

    let mut layers = vec![console_layer(format, build_filter(explicit_level))];
    let mut file_guard = None;

    if let Some(path) = log_file {
        let (layer, guard) = file_layer(format, build_filter(explicit_level), &path)?;
        layers.push(layer);
        file_guard = Some(guard);
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|e| LoggingError::InitializationFailed(e.to_string()))?;

    Ok(LoggingGuard { _file: file_guard })
}

/// Logging initialization error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError
{
    /// Invalid log format
    #[error("Invalid log format: {0}")]
    InvalidFormat(String),

    /// Invalid log level
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    /// Failed to initialize logging
    #[error("Failed to initialize logging: {0}")]
    InitializationFailed(String),

    /// File logging error
    #[error("File logging error: {0}")]
    FileError(#[from] io::Error),
}
