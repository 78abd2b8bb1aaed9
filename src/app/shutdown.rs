//! Graceful shutdown handling.

use tokio_util::sync::CancellationToken;

/// Stops the background updater and waits for it to finish.
pub async fn shutdown_gracefully(
    cancel: CancellationToken,
    updater_task: Option<tokio::task::JoinHandle<()>>,
) {
    cancel.cancel();
    if let Some(updater_task) = updater_task {
        if let Err(e) = updater_task.await {
            log::warn!("GeoIP updater task failed: {:?}", e);
        }
    }
}

/// Cancels `cancel` on Ctrl-C.
///
/// The returned task ends on its own when `cancel` fires for another reason.
pub fn cancel_on_interrupt(cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                match result {
                    Ok(()) => log::info!("Interrupt received, shutting down"),
                    Err(e) => {
                        log::warn!("Failed to listen for interrupt: {}", e);
                        return;
                    }
                }
                cancel.cancel();
            }
            _ = cancel.cancelled() => {}
        }
    })
}
