//! Termination signal listener.
//!
//! The listener never touches the session: it only cancels the shutdown
//! token, and the serve loop notices before reading the next request.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Install SIGINT and SIGTERM handlers and forward them to `shutdown`.
#[cfg(unix)]
pub fn spawn_listener(shutdown: CancellationToken) -> std::io::Result<JoinHandle<()>> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    Ok(tokio::spawn(async move {
        loop {
            let name = tokio::select! {
                Some(()) = interrupt.recv() => "SIGINT",
                Some(()) = terminate.recv() => "SIGTERM",
                else => break,
            };
            request_shutdown(&shutdown, name);
        }
    }))
}

/// Install a Ctrl-C handler and forward it to `shutdown`.
#[cfg(not(unix))]
pub fn spawn_listener(shutdown: CancellationToken) -> std::io::Result<JoinHandle<()>> {
    Ok(tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            request_shutdown(&shutdown, "Ctrl-C");
        }
    }))
}

/// Cancel the token on the first signal; later signals are no-ops.
fn request_shutdown(shutdown: &CancellationToken, signal: &str) -> bool {
    if shutdown.is_cancelled() {
        tracing::debug!("Received {signal} during shutdown, ignoring");
        return false;
    }
    tracing::info!("Received {signal}, shutting down");
    shutdown.cancel();
    true
}
