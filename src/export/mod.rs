//! Read-only exports of stored scan results.

mod csv;
mod jsonl;
mod queries;

pub use csv::export_csv;
pub use jsonl::export_jsonl;
pub use queries::ExportSelection;
