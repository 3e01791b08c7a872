//! Single-domain probe: protocol fallback, manual redirect following,
//! deadline enforcement, snippet capture.
//!
//! The client is built with redirects disabled (see
//! [`crate::initialization::init_client`]) so every hop is observed and
//! recorded here. One probe is strictly sequential internally; concurrency
//! exists only across domains.

use std::time::{Duration, Instant};

use log::{debug, info, warn};
use url::Url;

use crate::config::Config;
use crate::error_handling::{categorize_transport_error, ScanCategory};
use crate::fetch::snippet::read_snippet;
use crate::models::{RedirectHop, ScanOutcome};

/// Probe parameters, extracted from the run configuration.
#[derive(Debug, Clone, Copy)]
pub struct ProbeOptions {
    /// End-to-end probe deadline
    pub timeout: Duration,
    /// Redirect hop bound
    pub max_redirects: usize,
    /// Snippet length bound in characters
    pub snippet_size: usize,
}

impl From<&Config> for ProbeOptions {
    fn from(config: &Config) -> Self {
        ProbeOptions {
            timeout: Duration::from_secs(config.timeout_seconds),
            max_redirects: config.max_redirects,
            snippet_size: config.snippet_size,
        }
    }
}

/// Probes a single domain and classifies the result.
///
/// Attempts `https://{domain}` first; a transport-level failure on a secure
/// attempt triggers one retry over plain HTTP against the same host. An HTTP
/// error status is terminal on either scheme, never a fallback trigger.
/// Redirects are followed manually up to `max_redirects` hops; reaching the
/// bound stores the last-followed hop's status as terminal and marks the
/// chain truncated. One deadline covers the whole probe, including the body
/// read for the snippet.
///
/// Never fails the caller: every path returns a `ScanOutcome`.
pub async fn probe(client: &reqwest::Client, domain: &str, options: &ProbeOptions) -> ScanOutcome {
    let started = Instant::now();
    let deadline = started + options.timeout;

    let mut chain: Vec<RedirectHop> = Vec::new();
    let mut current = format!("https://{domain}");
    let mut fell_back = false;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return timeout_outcome(domain, chain, started);
        }

        debug!("Requesting {current}");
        let attempt = tokio::time::timeout(remaining, client.get(&current).send()).await;

        let response = match attempt {
            Err(_) => return timeout_outcome(domain, chain, started),
            Ok(Err(e)) => {
                // With redirects disabled on the client, a send error is
                // always transport-level, never an HTTP error status.
                if !fell_back && current.starts_with("https://") {
                    info!("HTTPS failed for {domain}, trying HTTP: {e}");
                    fell_back = true;
                    current = current.replacen("https://", "http://", 1);
                    continue;
                }
                let category = categorize_transport_error(&e);
                return ScanOutcome::failure(
                    category,
                    root_cause(&e),
                    chain,
                    started.elapsed().as_millis() as u64,
                );
            }
            Ok(Ok(response)) => response,
        };

        let status = response.status();
        if status.is_redirection() {
            if let Some(next) = redirect_target(&current, &response) {
                if chain.len() + 1 > options.max_redirects {
                    // Hop bound of zero: terminal without recording a hop.
                    return ScanOutcome::http(
                        status.as_u16(),
                        chain,
                        None,
                        started.elapsed().as_millis() as u64,
                    );
                }
                let mut hop = RedirectHop::new(current.clone(), status.as_u16());
                if chain.len() + 1 == options.max_redirects {
                    // Hop bound reached: stop following, keep this hop's
                    // status as the terminal result.
                    hop.truncated = true;
                    chain.push(hop);
                    warn!(
                        "Redirect chain for {domain} truncated at {} hops",
                        options.max_redirects
                    );
                    return ScanOutcome::http(
                        status.as_u16(),
                        chain,
                        None,
                        started.elapsed().as_millis() as u64,
                    );
                }
                chain.push(hop);
                current = next;
                continue;
            }
            // Redirect status without a usable Location header is terminal.
            warn!("Redirect status {status} for {current} without usable Location header");
        }

        // Terminal response. Snippet only for an exact 200.
        let snippet = if status.as_u16() == 200 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return timeout_outcome(domain, chain, started);
            }
            match tokio::time::timeout(remaining, read_snippet(response, options.snippet_size))
                .await
            {
                Ok(snippet) => snippet,
                Err(_) => return timeout_outcome(domain, chain, started),
            }
        } else {
            None
        };

        return ScanOutcome::http(
            status.as_u16(),
            chain,
            snippet,
            started.elapsed().as_millis() as u64,
        );
    }
}

fn timeout_outcome(domain: &str, chain: Vec<RedirectHop>, started: Instant) -> ScanOutcome {
    warn!("Probe deadline exceeded for {domain}");
    ScanOutcome::failure(
        ScanCategory::Timeout,
        "probe deadline exceeded",
        chain,
        started.elapsed().as_millis() as u64,
    )
}

/// Resolves the Location header of a redirect response against the current
/// URL. Relative targets are joined onto the hop's base.
fn redirect_target(current: &str, response: &reqwest::Response) -> Option<String> {
    let location = response
        .headers()
        .get(reqwest::header::LOCATION)?
        .to_str()
        .ok()?;
    let next = Url::parse(location)
        .or_else(|_| Url::parse(current).and_then(|base| base.join(location)))
        .ok()?;
    Some(next.to_string())
}

/// Innermost cause of a reqwest error, for the human-readable error detail.
fn root_cause(error: &reqwest::Error) -> String {
    let mut cause: &(dyn std::error::Error + 'static) = error;
    while let Some(source) = cause.source() {
        cause = source;
    }
    cause.to_string()
}
