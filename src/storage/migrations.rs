//! Schema setup.
//!
//! The schema is embedded and applied at startup with `IF NOT EXISTS`
//! statements, so a database created by an earlier run is reused as-is.

use sqlx::{Pool, Sqlite};

use crate::error_handling::DatabaseError;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS results (
        domain TEXT PRIMARY KEY,
        status_code INTEGER,
        redirect_chain TEXT,
        snippet TEXT,
        error_message TEXT,
        last_checked TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        scan_duration_ms INTEGER
    )",
    "CREATE INDEX IF NOT EXISTS idx_status_code ON results(status_code)",
    "CREATE INDEX IF NOT EXISTS idx_last_checked ON results(last_checked)",
];

/// Creates the `results` table and its indexes if they don't already exist.
pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<(), DatabaseError> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
