//! Result store: SQLite pool, schema, and record access.

mod migrations;
mod pool;
mod records;

pub use migrations::run_migrations;
pub use pool::init_db_pool;
pub use records::{cached_domains, get_record, query_records, upsert_record, StatusFilter};
