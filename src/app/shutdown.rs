//! Graceful shutdown handling.

use tokio_util::sync::CancellationToken;

/// Shuts down background tasks gracefully.
///
/// Signals the progress-logging task to stop and waits for it to finish so
/// no log line lands after the summary.
pub async fn shutdown_gracefully(
    cancel: CancellationToken,
    logging_task: Option<tokio::task::JoinHandle<()>>,
) {
    cancel.cancel();
    if let Some(logging_task) = logging_task {
        let _ = logging_task.await;
    }
}
