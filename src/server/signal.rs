// Signal handling
//
// The server has exactly one termination path: an interrupt signal.
// SIGINT and SIGTERM both resolve the future; the caller logs and exits 0.

/// Resolve when a termination signal arrives, yielding its name for the
/// shutdown message.
#[cfg(unix)]
pub async fn shutdown_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm =
        signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");
    let mut sigint = signal(SignalKind::interrupt()).expect("Failed to register SIGINT handler");

    tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT (Ctrl+C)",
    }
}

/// Windows fallback - only Ctrl+C is supported
#[cfg(not(unix))]
pub async fn shutdown_signal() -> &'static str {
    if let Err(e) = tokio::signal::ctrl_c().await {
        crate::logger::log_error(&format!("Failed to listen for Ctrl+C: {e}"));
        // Without a working signal handler the future must never resolve,
        // or the server would shut down unprompted.
        std::future::pending::<()>().await;
    }
    "Ctrl+C"
}
