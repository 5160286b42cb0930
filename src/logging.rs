//! Logging setup for the proxy and the CLI.
//!
//! Structured logging through `tracing`; `RUST_LOG` overrides the level
//! chosen from the command line.

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Logging configuration options
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to output
    pub level: Level,
    /// Enable colored output
    pub color: bool,
    /// Show timestamps
    pub show_timestamps: bool,
    /// Show target/module name
    pub show_target: bool,
    /// Enable JSON format for machine parsing
    pub json_format: bool,
    /// Enable span events for tracing
    pub enable_spans: bool,
    /// Output to file instead of stderr
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_mode(ApplicationMode::Cli)
    }
}

impl LoggingConfig {
    /// Create config for different application modes
    pub fn for_mode(mode: ApplicationMode) -> Self {
        match mode {
            ApplicationMode::Proxy => Self {
                level: Level::INFO,
                color: false,
                show_timestamps: true,
                show_target: true,
                json_format: false,
                enable_spans: true,
                file_output: None,
            },
            ApplicationMode::Cli => Self {
                level: Level::WARN,
                color: true,
                show_timestamps: false,
                show_target: false,
                json_format: false,
                enable_spans: false,
                file_output: None,
            },
            ApplicationMode::Test => Self {
                level: Level::DEBUG,
                color: false,
                show_timestamps: true,
                show_target: true,
                json_format: false,
                enable_spans: true,
                file_output: None,
            },
        }
    }

    /// Create config from CLI arguments.
    ///
    /// `verbose` is the number of `-v` flags: one raises the level to INFO,
    /// two or more to DEBUG.
    pub fn from_args(quiet: bool, verbose: u8, json: bool) -> Self {
        let level = match (quiet, verbose) {
            (true, _) => Level::ERROR,
            (false, 0) => Level::WARN,
            (false, 1) => Level::INFO,
            (false, _) => Level::DEBUG,
        };

        Self {
            level,
            color: !quiet && !json && io::stderr().is_terminal(),
            show_timestamps: verbose > 1 || json,
            show_target: verbose > 1,
            json_format: json,
            enable_spans: verbose > 1,
            file_output: None,
        }
    }

    /// Proxy defaults, keeping the level and format picked on the command line
    pub fn for_proxy(from_args: &LoggingConfig, file_output: Option<PathBuf>) -> Self {
        let mut config = Self::for_mode(ApplicationMode::Proxy);
        config.level = from_args.level.max(Level::INFO);
        config.json_format = from_args.json_format;
        config.color = from_args.color && file_output.is_none();
        config.file_output = file_output;
        config
    }
}

/// Application modes with different logging requirements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationMode {
    /// Long-running proxy, detailed for debugging
    Proxy,
    /// One-shot CLI commands, quiet unless asked
    Cli,
    /// Test mode - maximum detail for testing
    Test,
}

/// Initialize the logging system
pub fn init_logging(config: LoggingConfig) -> io::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("github_import={}", config.level)));

    let registry = Registry::default().with(env_filter);

    if let Some(log_file) = config.file_output {
        let (dir, file_name) = split_log_path(&log_file)?;
        std::fs::create_dir_all(dir)?;
        let file_appender = tracing_appender::rolling::never(dir, file_name);

        if config.json_format {
            let json_layer = fmt::layer()
                .json()
                .with_current_span(config.enable_spans)
                .with_span_events(FmtSpan::CLOSE)
                .with_writer(file_appender);
            json_layer.with_subscriber(registry).init();
        } else {
            let fmt_layer = fmt::layer()
                .with_target(config.show_target)
                .with_level(true)
                .with_ansi(false)
                .with_writer(file_appender);

            if config.show_timestamps {
                fmt_layer
                    .with_timer(fmt::time::ChronoUtc::rfc_3339())
                    .with_subscriber(registry)
                    .init();
            } else {
                fmt_layer.with_subscriber(registry).init();
            }
        }
    } else if config.json_format {
        let json_layer = fmt::layer()
            .json()
            .with_current_span(config.enable_spans)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(io::stderr);
        json_layer.with_subscriber(registry).init();
    } else {
        // stdout carries command output, so logs go to stderr
        let fmt_layer = fmt::layer()
            .with_target(config.show_target)
            .with_level(true)
            .with_ansi(config.color)
            .with_writer(io::stderr);

        if config.show_timestamps {
            fmt_layer
                .with_timer(fmt::time::ChronoUtc::rfc_3339())
                .with_subscriber(registry)
                .init();
        } else {
            fmt_layer.with_subscriber(registry).init();
        }
    }

    Ok(())
}

fn split_log_path(log_file: &Path) -> io::Result<(&Path, &std::ffi::OsStr)> {
    let file_name = log_file
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Invalid log file name"))?;
    let dir = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok((dir, file_name))
}

/// Default log file for a given application mode, under `~/.github-import/logs`
pub fn log_file_path(mode: ApplicationMode) -> Option<PathBuf> {
    let log_dir = dirs::home_dir()?.join(".github-import").join("logs");
    let name = match mode {
        ApplicationMode::Proxy => "proxy.log",
        ApplicationMode::Cli => "cli.log",
        ApplicationMode::Test => "test.log",
    };
    Some(log_dir.join(name))
}

/// Log file for the proxy: the explicit `--log-file`, otherwise the default
/// file when the proxy runs detached from a terminal
pub fn proxy_log_file(explicit: Option<PathBuf>, interactive: bool) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path),
        None if interactive => None,
        None => log_file_path(ApplicationMode::Proxy),
    }
}

/// Utility macro for structured error logging
#[macro_export]
macro_rules! log_error {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            code = $error.to_error_code(),
            context = $context,
            "Operation failed"
        );
    };
}
