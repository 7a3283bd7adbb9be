//! # Logging Utilities
//!
//! Logging infrastructure for hexbound using `tracing`.
//!
//! - Pretty output for humans, JSON for machines
//! - Level filtering through `RUST_LOG` or an explicit level
//! - Optional daily-rolling log file next to the console output
//!
//! Console output goes to **stderr**: stdout belongs to the CLI's results.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hexbound_utils::init_logging;
//!
//! // Keep the guard alive for as long as you log
//! let _guard = init_logging().expect("Failed to initialize logging");
//! tracing::info!("Application started");
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Log filter (e.g., `RUST_LOG=debug`, `RUST_LOG=hexbound_core=trace`)
//! - `HEXBOUND_LOG_FORMAT`: `json` or `pretty` (default: `pretty`)
//! - `HEXBOUND_LOG_FILE`: Optional path to a log file

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{env, io};

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Variable selecting the output format.
pub const LOG_FORMAT_ENV: &str = "HEXBOUND_LOG_FORMAT";

/// Variable naming an optional log file.
pub const LOG_FILE_ENV: &str = "HEXBOUND_LOG_FILE";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat
{
    /// Pretty-printed, human-readable format (default)
    #[default]
    Pretty,
    /// JSON format
    Json,
}

impl FromStr for LogFormat
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "pretty" | "dev" | "development" => Ok(LogFormat::Pretty),
            "json" | "prod" | "production" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {s}. Use 'pretty' or 'json'")),
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
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "error" | "err" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" | "dbg" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(format!(
                "Unknown log level: {s}. Use 'error', 'warn', 'info', 'debug', or 'trace'"
            )),
        }
    }
}

/// Logging configuration
///
/// Built from the environment with [`LogConfig::from_env`], then adjusted by
/// command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig
{
    /// Explicit level; overrides `RUST_LOG` when set
    pub level: Option<LogLevel>,
    /// Output format
    pub format: LogFormat,
    /// Optional log file
    pub file: Option<PathBuf>,
    /// Level used when neither `level` nor `RUST_LOG` is set
    pub default_level: LogLevel,
}

impl Default for LogConfig
{
    fn default() -> Self
    {
        Self {
            level: None,
            format: LogFormat::Pretty,
            file: None,
            default_level: LogLevel::Warn,
        }
    }
}

impl LogConfig
{
    /// Read `HEXBOUND_LOG_FORMAT` and `HEXBOUND_LOG_FILE`.
    ///
    /// Invalid values are ignored and fall back to the defaults.
    pub fn from_env() -> Self
    {
        let format = env::var(LOG_FORMAT_ENV)
            .ok()
            .and_then(|s| LogFormat::from_str(&s).ok())
            .unwrap_or_default();
        let file = env::var_os(LOG_FILE_ENV).filter(|s| !s.is_empty()).map(PathBuf::from);

        Self {
            format,
            file,
            ..Self::default()
        }
    }

    /// Override the level.
    #[must_use]
    pub fn with_level(mut self, level: Option<LogLevel>) -> Self
    {
        if level.is_some() {
            self.level = level;
        }
        self
    }

    /// Override the format.
    #[must_use]
    pub fn with_format(mut self, format: Option<LogFormat>) -> Self
    {
        if let Some(format) = format {
            self.format = format;
        }
        self
    }

    /// Filter priority:
    /// 1. explicit `level`
    /// 2. `RUST_LOG` (supports module-specific filters like `hexbound_core=trace`)
    /// 3. `default_level`
    fn filter(&self) -> EnvFilter
    {
        let fallback = || EnvFilter::new(Level::from(self.default_level).to_string());
        match self.level {
            Some(level) => EnvFilter::new(Level::from(level).to_string()),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback()),
        }
    }
}

/// Keeps the background file writer alive. Logs written after the guard is
/// dropped may be lost.
#[must_use = "dropping the guard stops file logging"]
#[derive(Debug, Default)]
pub struct LogGuard
{
    _file: Option<WorkerGuard>,
}

/// Initialize logging from the environment
///
/// ## Errors
///
/// Returns an error if logging is already initialized or the log file
/// directory cannot be created.
pub fn init_logging() -> Result<LogGuard, LoggingError>
{
    init_logging_with(&LogConfig::from_env())
}

/// Initialize logging with an explicit configuration
///
/// ## Example
///
/// ```rust,no_run
/// use hexbound_utils::{LogConfig, LogFormat, LogLevel, init_logging_with};
///
/// let config = LogConfig::default()
///     .with_level(Some(LogLevel::Debug))
///     .with_format(Some(LogFormat::Json));
/// let _guard = init_logging_with(&config).expect("Failed to initialize logging");
/// ```
///
/// ## Errors
///
/// Returns an error if logging is already initialized or the log file
/// directory cannot be created.
pub fn init_logging_with(config: &LogConfig) -> Result<LogGuard, LoggingError>
{
    let mut layers: Vec<BoxedLayer> = vec![
        fmt_layer(config.format, io::stderr, true)
            .with_filter(config.filter())
            .boxed(),
    ];

    let mut guard = LogGuard::default();
    if let Some(path) = &config.file {
        let (dir, name) = split_log_path(path)?;
        std::fs::create_dir_all(&dir).map_err(LoggingError::FileError)?;

        let file_appender = tracing_appender::rolling::daily(dir, name);
        let (non_blocking, worker) = tracing_appender::non_blocking(file_appender);
        layers.push(
            fmt_layer(config.format, non_blocking, false) // No ANSI in files
                .with_filter(config.filter())
                .boxed(),
        );
        guard._file = Some(worker);
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|e| LoggingError::InitializationFailed(e.to_string()))?;

    Ok(guard)
}

/// One formatting layer for `writer`.
fn fmt_layer<W>(format: LogFormat, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_writer(writer);

    match format {
        LogFormat::Pretty => layer.with_ansi(ansi).boxed(),
        LogFormat::Json => layer.json().with_current_span(true).with_span_list(true).boxed(),
    }
}

/// Split a log path into the directory and the file name prefix.
fn split_log_path(path: &Path) -> Result<(PathBuf, PathBuf), LoggingError>
{
    let name = path
        .file_name()
        .ok_or_else(|| LoggingError::InvalidPath(path.display().to_string()))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, PathBuf::from(name)))
}

/// Logging initialization error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError
{
    /// Log file path has no file name
    #[error("Invalid log file path: {0}")]
    InvalidPath(String),

    /// Failed to initialize logging
    #[error("Failed to initialize logging: {0}")]
    InitializationFailed(String),

    /// File logging error
    #[error("File logging error: {0}")]
    FileError(#[from] io::Error),
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_log_format_from_str()
    {
        assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::from_str("dev").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str("PROD").unwrap(), LogFormat::Json);
        assert!(LogFormat::from_str("invalid").is_err());
    }

    #[test]
    fn test_log_level_from_str()
    {
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);
        assert_eq!(LogLevel::from_str("warning").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("dbg").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert!(LogLevel::from_str("loud").is_err());
    }

    #[test]
    fn test_log_level_to_tracing_level()
    {
        assert_eq!(Level::from(LogLevel::Error), Level::ERROR);
        assert_eq!(Level::from(LogLevel::Warn), Level::WARN);
        assert_eq!(Level::from(LogLevel::Info), Level::INFO);
        assert_eq!(Level::from(LogLevel::Debug), Level::DEBUG);
        assert_eq!(Level::from(LogLevel::Trace), Level::TRACE);
    }

    #[test]
    fn test_config_overrides()
    {
        let config = LogConfig::default()
            .with_level(Some(LogLevel::Trace))
            .with_format(None);
        assert_eq!(config.level, Some(LogLevel::Trace));
        assert_eq!(config.format, LogFormat::Pretty);

        let config = config.with_level(None).with_format(Some(LogFormat::Json));
        assert_eq!(config.level, Some(LogLevel::Trace));
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_split_log_path()
    {
        let (dir, name) = split_log_path(Path::new("/var/log/hexbound.log")).unwrap();
        assert_eq!(dir, PathBuf::from("/var/log"));
        assert_eq!(name, PathBuf::from("hexbound.log"));

        let (dir, name) = split_log_path(Path::new("hexbound.log")).unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, PathBuf::from("hexbound.log"));

        assert!(split_log_path(Path::new("/")).is_err());
    }
}
