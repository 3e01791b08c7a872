//! Progress logging utilities.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::info;

/// Logs a progress line for the scan in flight.
pub fn log_progress(start_time: std::time::Instant, completed: &Arc<AtomicUsize>, total: usize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let done = completed.load(Ordering::SeqCst);
    let rate = if elapsed_secs > 0.0 {
        done as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Scanned {}/{} domains in {:.2}s (~{:.2} domains/sec)",
        done, total, elapsed_secs, rate
    );
}
