//! Configuration constants.
//!
//! Defaults for the scanning engine. Every value here can be overridden from
//! the command line; these are the values used when a flag is absent.

/// Maximum concurrent probes (semaphore limit).
pub const DEFAULT_MAX_CONCURRENT: usize = 80;

/// Default SQLite database path.
pub const DEFAULT_DB_PATH: &str = "scan_results.db";

/// End-to-end probe timeout in seconds.
///
/// Covers connection setup, every redirect hop, and the body read for a
/// single domain. Expiry classifies the probe as a timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// TCP connection timeout in seconds (per connection attempt).
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Maximum number of redirect hops to follow before truncating the chain.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Maximum snippet length in characters, captured only from 200 responses.
pub const DEFAULT_SNIPPET_SIZE: usize = 2048;

/// User-Agent header sent with every probe.
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; SubdomainScanner/1.0)";

/// Accept header sent with every probe.
pub const ACCEPT_HEADER: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Interval between progress log lines, in seconds.
pub const LOGGING_INTERVAL_SECS: u64 = 5;

/// Snippet preview length used by the CSV export (full snippet stays in the
/// database; CSV rows get a readable prefix).
pub const EXPORT_SNIPPET_PREVIEW_CHARS: usize = 200;
