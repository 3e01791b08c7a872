//! Outcome taxonomy and error handling.
//!
//! Defines the closed set of probe outcome categories, the explicit mapping
//! from transport errors to categories, per-category statistics, and the
//! typed errors for store/initialization failures.

mod categorization;
mod stats;
mod types;

pub use categorization::categorize_transport_error;
pub use stats::ScanStats;
pub use types::{DatabaseError, InitializationError, ScanCategory};
