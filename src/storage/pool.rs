//! SQLite connection pool management.
//!
//! Creates the database file if missing, connects, and enables WAL mode so
//! concurrent writer tasks and readers do not block each other.

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use log::{error, info};
use sqlx::{Pool, Sqlite, SqlitePool};

use crate::error_handling::DatabaseError;

/// Initializes and returns a database connection pool for the given path.
///
/// Creates the database file if it doesn't exist and enables WAL mode.
pub async fn init_db_pool(db_path: &Path) -> Result<Arc<Pool<Sqlite>>, DatabaseError> {
    let db_path_str = db_path.to_string_lossy().to_string();
    match OpenOptions::new()
        .read(true)
        .write(true)
        .create_new(true)
        .open(&db_path_str)
    {
        Ok(_) => info!("Database file created at {db_path_str}"),
        Err(ref e) if e.kind() == ErrorKind::AlreadyExists => {
            info!("Using existing database at {db_path_str}")
        }
        Err(e) => {
            error!("Failed to create database file: {e}");
            return Err(DatabaseError::FileCreationError(e.to_string()));
        }
    }

    let pool = SqlitePool::connect(&format!("sqlite:{}", db_path_str))
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {e}");
            DatabaseError::SqlError(e)
        })?;

    // WAL mode: writers don't block readers during the scan.
    sqlx::query("PRAGMA journal_mode=WAL")
        .execute(&pool)
        .await
        .map_err(|e| {
            error!("Failed to set WAL mode: {e}");
            DatabaseError::SqlError(e)
        })?;

    Ok(Arc::new(pool))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_creates_file_and_connects() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.db");
        let pool = init_db_pool(&path).await.unwrap();
        assert!(path.exists());

        let mode: (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&*pool)
            .await
            .unwrap();
        assert_eq!(mode.0.to_lowercase(), "wal");
    }

    #[tokio::test]
    async fn test_init_reuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.db");
        init_db_pool(&path).await.unwrap();
        // Second open must not fail on the existing file.
        init_db_pool(&path).await.unwrap();
    }
}
