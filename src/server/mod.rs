//! HTTP service
//!
//! Exposes `GET /debt`, `GET /debt/history` and `GET /health` on axum. All
//! request state is read-only and shared behind an `Arc`.
//!
//! Shutdown follows the watch channel set up in `main`: once it flips to
//! `true` the listener stops accepting, in-flight requests get
//! `server.shutdown_timeout_secs` to finish, and anything left is dropped.

pub mod responses;
pub mod routes;

pub use routes::router;

use crate::config::DebtwatchConfig;
use crate::core::DebtService;
use crate::domain::{DebtwatchError, Result};
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;

/// Shared request state
pub struct AppState {
    pub service: DebtService,
}

impl AppState {
    pub fn new(service: DebtService) -> Self {
        Self { service }
    }
}

/// Bind and serve until shutdown is signalled
///
/// `bind` overrides `server.bind_address`.
///
/// # Errors
///
/// Returns an error if the service cannot be built, the address cannot be
/// bound, or the server fails while running.
pub async fn serve(
    config: &DebtwatchConfig,
    bind: Option<&str>,
    shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let service = DebtService::from_config(config)?;
    let address = bind.unwrap_or(&config.server.bind_address);

    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| DebtwatchError::Server(format!("Failed to bind {address}: {e}")))?;

    let local = listener
        .local_addr()
        .map_err(|e| DebtwatchError::Server(e.to_string()))?;
    tracing::info!(address = %local, "Listening");

    serve_listener(
        listener,
        Arc::new(AppState::new(service)),
        Duration::from_secs(config.server.shutdown_timeout_secs),
        shutdown,
    )
    .await
}

/// Serve on an already bound listener
pub async fn serve_listener(
    listener: TcpListener,
    state: Arc<AppState>,
    grace: Duration,
    shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let server = axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => {
            result.map_err(|e| DebtwatchError::Server(e.to_string()))?;
            tracing::info!("Server stopped");
            Ok(())
        }
        _ = async {
            shutdown_signal(shutdown).await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(
                grace_secs = grace.as_secs(),
                "Shutdown grace period elapsed, dropping in-flight requests"
            );
            Ok(())
        }
    }
}

async fn shutdown_signal(mut shutdown: watch::Receiver<bool>) {
    let signalled = shutdown.wait_for(|stop| *stop).await.is_ok();
    // A dropped sender means no shutdown can ever be signalled; keep serving
    if !signalled {
        std::future::pending::<()>().await;
    }
}
