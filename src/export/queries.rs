//! Named result selections for export.

use sqlx::{Pool, Sqlite};

use crate::error_handling::DatabaseError;
use crate::models::DomainRecord;
use crate::storage::{query_records, StatusFilter};

/// Which slice of the results table an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportSelection {
    /// Terminal 200 only.
    Successful,
    /// Terminal 3xx only.
    Redirecting,
    /// Every stored row, failures included.
    All,
}

impl ExportSelection {
    /// Default output filename for this selection.
    pub fn default_filename(self) -> &'static str {
        match self {
            ExportSelection::Successful => "successful_domains.csv",
            ExportSelection::Redirecting => "redirecting_domains.csv",
            ExportSelection::All => "all_results.csv",
        }
    }

    fn filter(self) -> StatusFilter {
        match self {
            ExportSelection::Successful => StatusFilter::Exact(200),
            ExportSelection::Redirecting => StatusFilter::Range(300, 400),
            ExportSelection::All => StatusFilter::Any,
        }
    }
}

/// Fetches the records covered by a selection, ordered by domain.
pub async fn fetch_selection(
    pool: &Pool<Sqlite>,
    selection: ExportSelection,
) -> Result<Vec<DomainRecord>, DatabaseError> {
    query_records(pool, selection.filter()).await
}
