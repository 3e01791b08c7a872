//! Run-level plumbing: progress logging, shutdown, and the final summary.

mod logging;
mod shutdown;
mod summary;

pub use logging::log_progress;
pub use shutdown::shutdown_gracefully;
pub use summary::print_summary;
