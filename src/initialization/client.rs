//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::ClientBuilder;

use crate::config::{ACCEPT_HEADER, TCP_CONNECT_TIMEOUT_SECS, USER_AGENT};
use crate::error_handling::InitializationError;

/// Initializes the shared HTTP client.
///
/// Redirects are disabled so the fetch engine can follow hops manually and
/// record the chain. The end-to-end probe deadline lives in the fetch engine,
/// so only the TCP connect timeout is set here. Uses the rustls TLS backend.
pub fn init_client() -> Result<Arc<reqwest::Client>, InitializationError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER));

    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()?;
    Ok(Arc::new(client))
}
