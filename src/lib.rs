//! subdomain_scan library: concurrent host liveness scanning.
//!
//! Probes large lists of subdomains over HTTPS (falling back to HTTP),
//! records the terminal status, redirect chain, and a content snippet per
//! domain in SQLite, and skips domains whose previous scan already produced
//! a valid response.
//!
//! # Example
//!
//! ```no_run
//! use subdomain_scan::{run_scan, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: std::path::PathBuf::from("domains.txt"),
//!     max_concurrent: 50,
//!     ..Default::default()
//! };
//!
//! let report = run_scan(config).await?;
//! println!(
//!     "Probed {} domains: {} live, {} failed",
//!     report.scanned, report.new_success, report.failed
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or call library functions from an async context.

#![warn(missing_docs)]

mod app;
pub mod config;
mod domain;
mod error_handling;
pub mod export;
mod fetch;
pub mod initialization;
mod models;
mod storage;

// Re-export public API
pub use app::print_summary;
pub use config::{Config, LogFormat, LogLevel, ScanMode};
pub use domain::{load_domains, normalize_candidate};
pub use error_handling::{ScanCategory, ScanStats};
pub use fetch::{probe, ProbeOptions};
pub use models::{DomainRecord, RedirectHop, ScanOutcome};
pub use run::{run_scan, ScanReport};
pub use storage::{
    cached_domains, get_record, init_db_pool, query_records, run_migrations, upsert_record,
    StatusFilter,
};

// Internal run module (contains the main scanning logic)
mod run {
    use std::collections::HashSet;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use anyhow::{Context, Result};
    use futures::stream::FuturesUnordered;
    use futures::StreamExt;
    use log::{error, info, warn};
    use tokio_util::sync::CancellationToken;

    use crate::app::{log_progress, shutdown_gracefully};
    use crate::config::{Config, ScanMode, LOGGING_INTERVAL_SECS};
    use crate::domain::load_domains;
    use crate::error_handling::{DatabaseError, ScanCategory, ScanStats};
    use crate::fetch::{probe, ProbeOptions};
    use crate::initialization::{init_client, init_semaphore};
    use crate::models::DomainRecord;
    use crate::storage::{cached_domains, init_db_pool, run_migrations, upsert_record};

    /// Results of a completed scan run.
    #[derive(Debug, Clone)]
    pub struct ScanReport {
        /// Domains in the input file after dedup and filtering
        pub total_candidates: usize,
        /// Domains actually probed this run
        pub scanned: usize,
        /// Probes that ended in a terminal 2xx
        pub new_success: usize,
        /// Probes that ended in a terminal 3xx
        pub new_redirect: usize,
        /// Probes that ended in any other outcome
        pub failed: usize,
        /// Domains exempted by a cached 200/3xx result
        pub skipped: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
        /// Path to the SQLite database containing results
        pub db_path: PathBuf,
        /// Per-category outcome counters for this run
        pub stats: Arc<ScanStats>,
    }

    /// Runs a scan with the provided configuration.
    ///
    /// This is the main entry point for the library. It loads the candidate
    /// list, drops domains the result store already has a valid response for
    /// (unless the mode is `force`), probes the rest concurrently, and
    /// upserts one row per executed probe.
    ///
    /// # Errors
    ///
    /// Fails if the input file cannot be read, or if the result store cannot
    /// be opened, migrated, or written. A failed store write aborts the run:
    /// no further probes start and the first write error is returned.
    /// Individual probe failures never fail the run; they are recorded as
    /// failure rows and counted in the report.
    pub async fn run_scan(config: Config) -> Result<ScanReport> {
        let domains = load_domains(&config.file).await?;
        let total_candidates = domains.len();

        let pool = init_db_pool(&config.db_path)
            .await
            .context("Failed to initialize database pool")?;
        run_migrations(&pool)
            .await
            .context("Failed to set up database schema")?;

        let cached = match config.mode {
            ScanMode::Force => HashSet::new(),
            ScanMode::Full | ScanMode::RescanFailed => cached_domains(&pool)
                .await
                .context("Failed to load cached results")?,
        };

        let (to_probe, skipped): (Vec<_>, Vec<_>) = domains
            .into_iter()
            .partition(|domain| !cached.contains(domain));
        let skipped = skipped.len();
        if skipped > 0 {
            info!("Skipping {skipped} domains with a cached 200/3xx result");
        }
        let to_scan = to_probe.len();
        info!(
            "Probing {} of {} domains (mode: {:?}, concurrency: {})",
            to_scan, total_candidates, config.mode, config.max_concurrent
        );

        let client = init_client().context("Failed to initialize HTTP client")?;
        let semaphore = init_semaphore(config.max_concurrent);
        let options = ProbeOptions::from(&config);
        let stats = Arc::new(ScanStats::new());

        let completed = Arc::new(AtomicUsize::new(0));
        let new_success = Arc::new(AtomicUsize::new(0));
        let new_redirect = Arc::new(AtomicUsize::new(0));
        let failed = Arc::new(AtomicUsize::new(0));

        let start_time = std::time::Instant::now();
        let cancel = CancellationToken::new();

        // On interrupt, stop launching probes; in-flight tasks wind down.
        // The listener itself winds down with the run token, so repeated
        // library calls don't accumulate signal listeners.
        let interrupt = cancel.clone();
        let run_done = cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                result = tokio::signal::ctrl_c() => {
                    if result.is_ok() {
                        warn!("Interrupt received; no new probes will start");
                        interrupt.cancel();
                    }
                }
                _ = run_done.cancelled() => {}
            }
        });

        let cancel_logging = cancel.child_token();
        let completed_for_logging = Arc::clone(&completed);
        let logging_task = Some(tokio::task::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(LOGGING_INTERVAL_SECS));
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        log_progress(start_time, &completed_for_logging, to_scan);
                    }
                    _ = cancel_logging.cancelled() => {
                        break;
                    }
                }
            }
        }));

        let mut tasks = FuturesUnordered::new();

        for domain in to_probe {
            if cancel.is_cancelled() {
                break;
            }

            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    warn!("Semaphore closed, skipping domain: {domain}");
                    continue;
                }
            };

            let client = Arc::clone(&client);
            let pool = Arc::clone(&pool);
            let stats = Arc::clone(&stats);
            let completed = Arc::clone(&completed);
            let new_success = Arc::clone(&new_success);
            let new_redirect = Arc::clone(&new_redirect);
            let failed = Arc::clone(&failed);
            let cancel_task = cancel.child_token();
            let abort = cancel.clone();

            tasks.push(tokio::spawn(async move {
                let _permit = permit;

                // A probe cancelled mid-flight writes nothing; its domain
                // stays eligible for the next run.
                let outcome = tokio::select! {
                    outcome = probe(&client, &domain, &options) => outcome,
                    _ = cancel_task.cancelled() => return Ok(()),
                };

                // The write must be durable before the domain counts as
                // done; a store that can't be written aborts the run.
                let record = DomainRecord::from_outcome(&domain, &outcome);
                if let Err(e) = upsert_record(&pool, &record).await {
                    error!("Failed to store result for {domain}: {e}");
                    abort.cancel();
                    return Err(e);
                }

                stats.record(outcome.category);
                match outcome.category {
                    ScanCategory::Success => {
                        new_success.fetch_add(1, Ordering::SeqCst);
                    }
                    ScanCategory::Redirect => {
                        new_redirect.fetch_add(1, Ordering::SeqCst);
                    }
                    _ => {
                        failed.fetch_add(1, Ordering::SeqCst);
                    }
                }
                completed.fetch_add(1, Ordering::SeqCst);
                Ok::<(), DatabaseError>(())
            }));
        }

        let mut store_error: Option<DatabaseError> = None;
        while let Some(task_result) = tasks.next().await {
            match task_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    if store_error.is_none() {
                        store_error = Some(e);
                    }
                }
                Err(join_error) => {
                    failed.fetch_add(1, Ordering::SeqCst);
                    warn!("Probe task panicked: {join_error:?}");
                }
            }
        }

        shutdown_gracefully(cancel, logging_task).await;
        log_progress(start_time, &completed, to_scan);

        if let Some(e) = store_error {
            return Err(e).context("Aborting run: result store rejected a write");
        }

        if let Err(e) = sqlx::query("PRAGMA wal_checkpoint(TRUNCATE)")
            .execute(pool.as_ref())
            .await
        {
            warn!("Failed to checkpoint WAL file (non-critical): {e}");
        }

        let elapsed_seconds = start_time.elapsed().as_secs_f64();

        Ok(ScanReport {
            total_candidates,
            scanned: completed.load(Ordering::SeqCst),
            new_success: new_success.load(Ordering::SeqCst),
            new_redirect: new_redirect.load(Ordering::SeqCst),
            failed: failed.load(Ordering::SeqCst),
            skipped,
            elapsed_seconds,
            db_path: config.db_path.clone(),
            stats,
        })
    }
}
