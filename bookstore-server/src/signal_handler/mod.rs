//! Graceful shutdown on SIGTERM, SIGHUP, SIGINT or Ctrl-c

use tokio::{
    signal::unix::{signal, Signal, SignalKind},
    sync::watch,
};

/// Is the shop currently trying to shut down?
///
/// This will be synced via a global [`tokio::sync::watch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InShutdown {
    Yes,
    No,
}

fn install(
    kind: SignalKind,
    name: &str,
    shutdown_tx: &watch::Sender<InShutdown>,
) -> Result<Signal, std::io::Error> {
    signal(kind).inspect_err(|e| {
        tracing::error!("Failed to install {name} listener: {e} Aborting.");
        shutdown_tx.send_replace(InShutdown::Yes);
    })
}

/// Wait for a signal and announce the shutdown on `shutdown_tx`
///
/// Returns early without announcing anything if someone else already announced a shutdown.
pub async fn signal_handler(shutdown_tx: watch::Sender<InShutdown>) -> Result<(), std::io::Error> {
    let mut watcher = shutdown_tx.subscribe();
    let mut sigterm = install(SignalKind::terminate(), "SIGTERM", &shutdown_tx)?;
    let mut sighup = install(SignalKind::hangup(), "SIGHUP", &shutdown_tx)?;
    let mut sigint = install(SignalKind::interrupt(), "SIGINT", &shutdown_tx)?;

    let reason = tokio::select! {
        _ = watcher.wait_for(|s| *s == InShutdown::Yes) => return Ok(()),
        _ = sigterm.recv() => "Got SIGTERM.",
        _ = sighup.recv() => "Got SIGHUP.",
        _ = sigint.recv() => "Got SIGINT.",
        x = tokio::signal::ctrl_c() => match x {
            Ok(()) => "Received Ctrl-c.",
            // we also shut down in case of error
            Err(e) => {
                tracing::error!("Unable to listen for Ctrl-c: {e}");
                "Ctrl-c listener failed."
            }
        },
    };
    tracing::info!("{reason} Shutting down.");
    shutdown_tx.send_replace(InShutdown::Yes);
    Ok(())
}

/// Resolves once a shutdown has been announced
///
/// Meant for [`axum::serve::Serve::with_graceful_shutdown`].
pub async fn wait_for_shutdown(mut watcher: watch::Receiver<InShutdown>) {
    // an error means every sender is gone, so nobody can announce a shutdown anymore
    if watcher.wait_for(|s| *s == InShutdown::Yes).await.is_err() {
        std::future::pending::<()>().await;
    }
}
