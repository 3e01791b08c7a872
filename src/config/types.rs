//! Configuration types and CLI options.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_DB_PATH, DEFAULT_MAX_CONCURRENT, DEFAULT_MAX_REDIRECTS, DEFAULT_SNIPPET_SIZE,
    DEFAULT_TIMEOUT_SECS,
};

/// Logging level for the application.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Scan mode: which stored records exempt a domain from re-probing.
///
/// `Full` and `RescanFailed` both honor the skip predicate (a stored 200 or
/// 3xx is never re-probed); `Force` ignores it and probes everything.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ScanMode {
    /// Probe every domain without a valid cached response (default)
    Full,
    /// Re-probe only failed/absent domains (same set as `full`)
    RescanFailed,
    /// Ignore the cache and re-probe everything
    Force,
}

/// Scan configuration, parsed from the command line or constructed
/// programmatically. One value per run; passed to the orchestrator, fetch
/// engine, and result store rather than held in globals.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "subdomain_scan",
    about = "High-concurrency subdomain scanner with SQLite result caching",
    version
)]
pub struct Config {
    /// Path to file containing domains (one per line, `#` comments allowed)
    pub file: PathBuf,

    /// Maximum concurrent connections
    #[arg(short = 'c', long = "concurrent", default_value_t = DEFAULT_MAX_CONCURRENT)]
    pub max_concurrent: usize,

    /// SQLite database path
    #[arg(short = 'd', long = "db", default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// End-to-end probe timeout in seconds
    #[arg(long = "timeout", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Maximum redirect hops to follow per probe
    #[arg(long, default_value_t = DEFAULT_MAX_REDIRECTS)]
    pub max_redirects: usize,

    /// Maximum content snippet length in characters
    #[arg(long, default_value_t = DEFAULT_SNIPPET_SIZE)]
    pub snippet_size: usize,

    /// Scan mode
    #[arg(long, value_enum, default_value = "full")]
    pub mode: ScanMode,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,

    /// Export domains with 200 status to successful_domains.csv
    #[arg(long)]
    pub export_200: bool,

    /// Export domains with 3xx status to redirecting_domains.csv
    #[arg(long)]
    pub export_3xx: bool,

    /// Export all results to all_results.csv
    #[arg(long)]
    pub export_all: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from("domains.txt"),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            snippet_size: DEFAULT_SNIPPET_SIZE,
            mode: ScanMode::Full,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            export_200: false,
            export_3xx: false,
            export_all: false,
        }
    }
}
