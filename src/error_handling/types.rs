//! Error and outcome type definitions.

use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] reqwest::Error),
}

/// Error types for database operations.
///
/// These are the only fatal errors in the system: a store that cannot be
/// opened or written aborts the run, since no results could be recorded.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Redirect chain could not be serialized for storage.
    #[error("Redirect chain serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Closed set of probe outcome categories.
///
/// Every probe resolves to exactly one category. The first four come from a
/// completed HTTP exchange (classified by status range); the rest are
/// transport-level failures mapped by
/// [`categorize_transport_error`](super::categorize_transport_error).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ScanCategory {
    /// Terminal 2xx response
    Success,
    /// Terminal 3xx response (including chains truncated at the hop bound)
    Redirect,
    /// Terminal 4xx response
    ClientError,
    /// Terminal 5xx response
    ServerError,
    /// End-to-end deadline or connect/read deadline exceeded
    Timeout,
    /// Connection refused, reset, or unreachable
    ConnectionError,
    /// Name resolution failure
    DnsError,
    /// TLS certificate or handshake failure
    TlsError,
    /// Any other transport-level failure (message preserved)
    Unknown,
}

impl ScanCategory {
    /// Classifies a completed HTTP exchange by status code range.
    ///
    /// Applies regardless of the transport path taken (secure or plain).
    /// Non-standard codes outside 200..600 fall into `Unknown`.
    pub fn from_status(status: u16) -> Self {
        match status {
            200..=299 => ScanCategory::Success,
            300..=399 => ScanCategory::Redirect,
            400..=499 => ScanCategory::ClientError,
            500..=599 => ScanCategory::ServerError,
            _ => ScanCategory::Unknown,
        }
    }

    /// Stable label used in `error_message` values and summary output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanCategory::Success => "Success",
            ScanCategory::Redirect => "Redirect",
            ScanCategory::ClientError => "ClientError",
            ScanCategory::ServerError => "ServerError",
            ScanCategory::Timeout => "Timeout",
            ScanCategory::ConnectionError => "ConnectionError",
            ScanCategory::DnsError => "DNSError",
            ScanCategory::TlsError => "TLSError",
            ScanCategory::Unknown => "Unknown",
        }
    }

    /// Whether the category represents a transport failure rather than a
    /// completed HTTP exchange.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            ScanCategory::Timeout
                | ScanCategory::ConnectionError
                | ScanCategory::DnsError
                | ScanCategory::TlsError
                | ScanCategory::Unknown
        )
    }
}

impl std::fmt::Display for ScanCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
