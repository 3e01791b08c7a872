//! Result record reads and writes.
//!
//! One row per domain, keyed by name. A re-probe replaces the previous row
//! image wholesale via upsert, so every column reflects the latest executed
//! probe. Skipped domains are never written, which keeps their
//! `last_checked` stamp at the probe that produced the cached result.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use log::warn;
use sqlx::{FromRow, Pool, Sqlite};

use crate::error_handling::DatabaseError;
use crate::models::{DomainRecord, RedirectHop};

#[derive(FromRow)]
struct ResultRow {
    domain: String,
    status_code: Option<i64>,
    redirect_chain: Option<String>,
    snippet: Option<String>,
    error_message: Option<String>,
    last_checked: DateTime<Utc>,
    scan_duration_ms: Option<i64>,
}

impl ResultRow {
    fn into_record(self) -> DomainRecord {
        let redirect_chain = match self.redirect_chain.as_deref() {
            None | Some("") => Vec::new(),
            Some(json) => parse_chain(&self.domain, json),
        };
        DomainRecord {
            domain: self.domain,
            status_code: self.status_code.map(|s| s as u16),
            redirect_chain,
            snippet: self.snippet,
            error_message: self.error_message,
            last_checked: self.last_checked,
            scan_duration_ms: self.scan_duration_ms.unwrap_or(0),
        }
    }
}

fn parse_chain(domain: &str, json: &str) -> Vec<RedirectHop> {
    match serde_json::from_str(json) {
        Ok(chain) => chain,
        Err(e) => {
            warn!("Unreadable redirect_chain for {domain}: {e}");
            Vec::new()
        }
    }
}

/// Inserts or replaces the row for a domain with the given record image.
pub async fn upsert_record(
    pool: &Pool<Sqlite>,
    record: &DomainRecord,
) -> Result<(), DatabaseError> {
    let chain_json = serde_json::to_string(&record.redirect_chain)?;

    sqlx::query(
        r#"
        INSERT INTO results (
            domain, status_code, redirect_chain, snippet,
            error_message, last_checked, scan_duration_ms
        )
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(domain) DO UPDATE SET
            status_code = excluded.status_code,
            redirect_chain = excluded.redirect_chain,
            snippet = excluded.snippet,
            error_message = excluded.error_message,
            last_checked = excluded.last_checked,
            scan_duration_ms = excluded.scan_duration_ms
        "#,
    )
    .bind(&record.domain)
    .bind(record.status_code.map(|s| s as i64))
    .bind(chain_json)
    .bind(&record.snippet)
    .bind(&record.error_message)
    .bind(record.last_checked)
    .bind(record.scan_duration_ms)
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetches the stored record for a single domain, if any.
pub async fn get_record(
    pool: &Pool<Sqlite>,
    domain: &str,
) -> Result<Option<DomainRecord>, DatabaseError> {
    let row: Option<ResultRow> = sqlx::query_as(
        "SELECT domain, status_code, redirect_chain, snippet,
                error_message, last_checked, scan_duration_ms
         FROM results WHERE domain = ?",
    )
    .bind(domain)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(ResultRow::into_record))
}

/// Domains whose stored result exempts them from re-probing.
///
/// A domain is exempt when its last executed probe ended in a terminal 200
/// or any 3xx. Errors, 4xx, 5xx, and absent rows all mean "probe again".
pub async fn cached_domains(pool: &Pool<Sqlite>) -> Result<HashSet<String>, DatabaseError> {
    let rows: Vec<(String,)> = sqlx::query_as(
        "SELECT domain FROM results
         WHERE status_code = 200 OR (status_code >= 300 AND status_code < 400)",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(domain,)| domain).collect())
}

/// Row selection for bulk reads, by terminal status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    /// Every row, including transport failures with no status.
    Any,
    /// Rows with exactly this status.
    Exact(u16),
    /// Rows with a status in `[low, high)`.
    Range(u16, u16),
}

/// Fetches stored records matching a status filter, ordered by domain.
pub async fn query_records(
    pool: &Pool<Sqlite>,
    filter: StatusFilter,
) -> Result<Vec<DomainRecord>, DatabaseError> {
    const COLUMNS: &str = "domain, status_code, redirect_chain, snippet,
                           error_message, last_checked, scan_duration_ms";

    let rows: Vec<ResultRow> = match filter {
        StatusFilter::Any => {
            sqlx::query_as(&format!(
                "SELECT {COLUMNS} FROM results ORDER BY domain"
            ))
            .fetch_all(pool)
            .await?
        }
        StatusFilter::Exact(status) => {
            sqlx::query_as(&format!(
                "SELECT {COLUMNS} FROM results WHERE status_code = ? ORDER BY domain"
            ))
            .bind(status as i64)
            .fetch_all(pool)
            .await?
        }
        StatusFilter::Range(low, high) => {
            sqlx::query_as(&format!(
                "SELECT {COLUMNS} FROM results
                 WHERE status_code >= ? AND status_code < ? ORDER BY domain"
            ))
            .bind(low as i64)
            .bind(high as i64)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows.into_iter().map(ResultRow::into_record).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::ScanCategory;
    use crate::models::ScanOutcome;
    use crate::storage::migrations::run_migrations;
    use crate::storage::pool::init_db_pool;

    async fn test_pool() -> std::sync::Arc<Pool<Sqlite>> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.db");
        let pool = init_db_pool(&path).await.unwrap();
        run_migrations(&pool).await.unwrap();
        // Keep the tempdir alive for the duration of the process.
        std::mem::forget(dir);
        pool
    }

    #[tokio::test]
    async fn test_upsert_and_get_roundtrip() {
        let pool = test_pool().await;
        let outcome = ScanOutcome::http(
            200,
            vec![RedirectHop::new("https://a.example/", 301)],
            Some("welcome".to_string()),
            42,
        );
        let record = DomainRecord::from_outcome("a.example", &outcome);
        upsert_record(&pool, &record).await.unwrap();

        let fetched = get_record(&pool, "a.example").await.unwrap().unwrap();
        assert_eq!(fetched.status_code, Some(200));
        assert_eq!(fetched.snippet.as_deref(), Some("welcome"));
        assert_eq!(fetched.redirect_chain.len(), 1);
        assert_eq!(fetched.redirect_chain[0].status_code, 301);
        assert_eq!(fetched.scan_duration_ms, 42);
    }

    #[tokio::test]
    async fn test_upsert_replaces_previous_row() {
        let pool = test_pool().await;

        let failed = ScanOutcome::failure(ScanCategory::DnsError, "no address", Vec::new(), 5);
        upsert_record(&pool, &DomainRecord::from_outcome("b.example", &failed))
            .await
            .unwrap();

        let ok = ScanOutcome::http(200, Vec::new(), Some("hi".to_string()), 7);
        upsert_record(&pool, &DomainRecord::from_outcome("b.example", &ok))
            .await
            .unwrap();

        let fetched = get_record(&pool, "b.example").await.unwrap().unwrap();
        assert_eq!(fetched.status_code, Some(200));
        // The failure's error_message must not survive the re-probe.
        assert!(fetched.error_message.is_none());
    }

    #[tokio::test]
    async fn test_cached_domains_covers_200_and_3xx_only() {
        let pool = test_pool().await;

        for (domain, outcome) in [
            ("ok.example", ScanOutcome::http(200, Vec::new(), None, 1)),
            ("moved.example", ScanOutcome::http(301, Vec::new(), None, 1)),
            ("missing.example", ScanOutcome::http(404, Vec::new(), None, 1)),
            ("broken.example", ScanOutcome::http(500, Vec::new(), None, 1)),
            (
                "dead.example",
                ScanOutcome::failure(ScanCategory::Timeout, "deadline", Vec::new(), 1),
            ),
        ] {
            upsert_record(&pool, &DomainRecord::from_outcome(domain, &outcome))
                .await
                .unwrap();
        }

        let cached = cached_domains(&pool).await.unwrap();
        assert!(cached.contains("ok.example"));
        assert!(cached.contains("moved.example"));
        assert!(!cached.contains("missing.example"));
        assert!(!cached.contains("broken.example"));
        assert!(!cached.contains("dead.example"));
    }

    #[tokio::test]
    async fn test_query_records_filters() {
        let pool = test_pool().await;
        for (domain, outcome) in [
            ("a.example", ScanOutcome::http(200, Vec::new(), None, 1)),
            ("b.example", ScanOutcome::http(302, Vec::new(), None, 1)),
            ("c.example", ScanOutcome::http(404, Vec::new(), None, 1)),
            (
                "d.example",
                ScanOutcome::failure(ScanCategory::ConnectionError, "refused", Vec::new(), 1),
            ),
        ] {
            upsert_record(&pool, &DomainRecord::from_outcome(domain, &outcome))
                .await
                .unwrap();
        }

        let all = query_records(&pool, StatusFilter::Any).await.unwrap();
        assert_eq!(all.len(), 4);
        // Ordered by domain, failures included.
        assert_eq!(all[3].domain, "d.example");
        assert!(all[3].status_code.is_none());

        let ok = query_records(&pool, StatusFilter::Exact(200)).await.unwrap();
        assert_eq!(ok.len(), 1);
        assert_eq!(ok[0].domain, "a.example");

        let redirects = query_records(&pool, StatusFilter::Range(300, 400))
            .await
            .unwrap();
        assert_eq!(redirects.len(), 1);
        assert_eq!(redirects[0].domain, "b.example");
    }

    #[tokio::test]
    async fn test_get_record_absent() {
        let pool = test_pool().await;
        assert!(get_record(&pool, "nope.example").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unreadable_chain_degrades_to_empty() {
        let pool = test_pool().await;
        sqlx::query(
            "INSERT INTO results (domain, status_code, redirect_chain, last_checked, scan_duration_ms)
             VALUES ('bad.example', 200, 'not json', CURRENT_TIMESTAMP, 0)",
        )
        .execute(&*pool)
        .await
        .unwrap();

        let fetched = get_record(&pool, "bad.example").await.unwrap().unwrap();
        assert!(fetched.redirect_chain.is_empty());
    }
}
