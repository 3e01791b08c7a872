//! Transport-error categorization.
//!
//! Maps a failed `reqwest` request into a [`ScanCategory`]. The mapping is an
//! explicit table over the error's source chain rather than ad hoc catching:
//! reqwest's own flags are checked first, then the wrapped io/TLS/DNS causes.

use std::error::Error as StdError;
use std::io;

use super::types::ScanCategory;

/// Categorizes a transport-level `reqwest::Error` into a `ScanCategory`.
///
/// Only called for requests that failed without producing an HTTP response;
/// completed exchanges are classified by status range instead. Walks the full
/// error source chain so failures wrapped by hyper/rustls are still mapped to
/// their category rather than `Unknown`.
pub fn categorize_transport_error(error: &reqwest::Error) -> ScanCategory {
    if error.is_timeout() {
        return ScanCategory::Timeout;
    }

    let mut source: Option<&(dyn StdError + 'static)> = error.source();
    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            if let Some(category) = categorize_io_error(io_err.kind()) {
                return category;
            }
        }
        if let Some(category) = categorize_cause_message(&cause.to_string()) {
            return category;
        }
        source = cause.source();
    }

    // No recognizable cause in the chain; fall back on reqwest's own flags.
    if error.is_connect() {
        ScanCategory::ConnectionError
    } else {
        ScanCategory::Unknown
    }
}

/// Maps an io error kind to a category, if it has a specific one.
fn categorize_io_error(kind: io::ErrorKind) -> Option<ScanCategory> {
    match kind {
        io::ErrorKind::TimedOut => Some(ScanCategory::Timeout),
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::NotConnected
        | io::ErrorKind::BrokenPipe => Some(ScanCategory::ConnectionError),
        _ => None,
    }
}

/// Maps a source-chain error message to a category, if it matches a known
/// failure class. Message matching is the only portable way to distinguish
/// DNS and TLS failures, since reqwest does not expose them as variants.
fn categorize_cause_message(message: &str) -> Option<ScanCategory> {
    let message = message.to_ascii_lowercase();

    if message.contains("dns error")
        || message.contains("failed to lookup address")
        || message.contains("name or service not known")
        || message.contains("no such host")
    {
        return Some(ScanCategory::DnsError);
    }

    if message.contains("certificate")
        || message.contains("handshake")
        || message.contains("invalid peer")
        || message.contains("tls")
    {
        return Some(ScanCategory::TlsError);
    }

    if message.contains("connection refused")
        || message.contains("connection reset")
        || message.contains("host unreachable")
        || message.contains("network unreachable")
    {
        return Some(ScanCategory::ConnectionError);
    }

    if message.contains("timed out") || message.contains("deadline") {
        return Some(ScanCategory::Timeout);
    }

    None
}
