//! Core data types: redirect hops, probe outcomes, and persisted records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error_handling::ScanCategory;

/// One followed hop in a redirect chain.
///
/// Serialized into the `redirect_chain` column as a JSON array in visit
/// order. Only followed redirect responses become hops; the terminal response
/// is represented by the record's `status_code`, so a probe with no redirects
/// stores an empty chain. A chain cut off at the hop bound carries
/// `truncated: true` on its final element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectHop {
    /// URL the redirect response was received from
    pub url: String,
    /// The 3xx status of that response
    pub status_code: u16,
    /// Set on the final hop of a chain cut off at the hop bound
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
}

impl RedirectHop {
    /// A followed (non-truncated) hop.
    pub fn new(url: impl Into<String>, status_code: u16) -> Self {
        RedirectHop {
            url: url.into(),
            status_code,
            truncated: false,
        }
    }
}

/// Outcome of a single probe, before it is written to the store.
///
/// Exactly one of `status_code` and `error_message` is set: a completed HTTP
/// exchange carries the terminal status, a transport failure carries the
/// category label plus detail.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Outcome classification
    pub category: ScanCategory,
    /// Terminal HTTP status, if the exchange completed
    pub status_code: Option<u16>,
    /// Redirect hops followed before the terminal response or failure
    pub redirect_chain: Vec<RedirectHop>,
    /// Content snippet, only for a terminal 200
    pub snippet: Option<String>,
    /// `"{Category}: {detail}"`, only for transport failures
    pub error_message: Option<String>,
    /// Wall-clock probe duration in milliseconds
    pub duration_ms: u64,
}

impl ScanOutcome {
    /// Outcome for a completed HTTP exchange with terminal status `status`.
    pub fn http(
        status: u16,
        redirect_chain: Vec<RedirectHop>,
        snippet: Option<String>,
        duration_ms: u64,
    ) -> Self {
        ScanOutcome {
            category: ScanCategory::from_status(status),
            status_code: Some(status),
            redirect_chain,
            snippet,
            error_message: None,
            duration_ms,
        }
    }

    /// Outcome for a transport-level failure. Hops completed before the
    /// failure are retained.
    pub fn failure(
        category: ScanCategory,
        detail: impl std::fmt::Display,
        redirect_chain: Vec<RedirectHop>,
        duration_ms: u64,
    ) -> Self {
        ScanOutcome {
            category,
            status_code: None,
            redirect_chain,
            snippet: None,
            error_message: Some(format!("{}: {}", category.as_str(), detail)),
            duration_ms,
        }
    }
}

/// One persisted row of the `results` table, keyed by domain.
#[derive(Debug, Clone, Serialize)]
pub struct DomainRecord {
    /// Probed host name (primary key)
    pub domain: String,
    /// Terminal HTTP status, NULL for transport failures
    pub status_code: Option<u16>,
    /// Followed redirect hops, stored as a JSON array
    pub redirect_chain: Vec<RedirectHop>,
    /// Content snippet, only for a terminal 200
    pub snippet: Option<String>,
    /// Failure label and detail, NULL for completed exchanges
    pub error_message: Option<String>,
    /// When the probe that produced this row executed
    pub last_checked: DateTime<Utc>,
    /// Wall-clock probe duration in milliseconds
    pub scan_duration_ms: i64,
}

impl DomainRecord {
    /// Builds the row image for an executed probe, stamping `last_checked`
    /// with the current time.
    pub fn from_outcome(domain: &str, outcome: &ScanOutcome) -> Self {
        DomainRecord {
            domain: domain.to_string(),
            status_code: outcome.status_code,
            redirect_chain: outcome.redirect_chain.clone(),
            snippet: outcome.snippet.clone(),
            error_message: outcome.error_message.clone(),
            last_checked: Utc::now(),
            scan_duration_ms: outcome.duration_ms as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hop_serialization_omits_truncated_when_false() {
        let hop = RedirectHop::new("https://a.example/", 301);
        let json = serde_json::to_string(&hop).unwrap();
        assert_eq!(json, r#"{"url":"https://a.example/","status_code":301}"#);
    }

    #[test]
    fn test_hop_serialization_keeps_truncation_marker() {
        let hop = RedirectHop {
            url: "https://b.example/".to_string(),
            status_code: 302,
            truncated: true,
        };
        let json = serde_json::to_string(&hop).unwrap();
        assert!(json.contains(r#""truncated":true"#));
    }

    #[test]
    fn test_hop_roundtrip_without_marker() {
        let parsed: RedirectHop =
            serde_json::from_str(r#"{"url":"https://a.example/","status_code":301}"#).unwrap();
        assert!(!parsed.truncated);
        assert_eq!(parsed.status_code, 301);
    }

    #[test]
    fn test_outcome_exclusivity() {
        let ok = ScanOutcome::http(200, Vec::new(), Some("hello".into()), 12);
        assert_eq!(ok.status_code, Some(200));
        assert!(ok.error_message.is_none());

        let failed = ScanOutcome::failure(
            crate::error_handling::ScanCategory::DnsError,
            "failed to lookup address",
            Vec::new(),
            34,
        );
        assert!(failed.status_code.is_none());
        assert_eq!(
            failed.error_message.as_deref(),
            Some("DNSError: failed to lookup address")
        );
    }
}
