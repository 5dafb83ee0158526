//! Codegrader · Question Bank Backend
//!
//! - Axum HTTP API to create and list coding questions
//! - MongoDB document store (in-memory when no MONGO_URI is given)
//! - Static question form (./static/index.html)
//!
//! Important env variables:
//!   PORT                   : u16 (default 5000)
//!   MONGO_URI              : MongoDB connection string; enables the MongoDB store
//!   MONGO_DB               : database name (default "codegrader")
//!   MONGO_COLLECTION       : collection name (default "questions")
//!   STATIC_DIR             : directory with the question form (default "./static")
//!   CODEGRADER_CONFIG_PATH : optional TOML file with the same settings
//!   LOG_LEVEL              : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT             : "pretty" (default) or "json"

mod telemetry;
mod config;
mod domain;
mod error;
mod protocol;
mod store;
mod state;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::config::AppConfig;
use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let cfg = AppConfig::load();

  // Store connection lives for the whole process; pinged once here. An
  // unreachable store is logged and requests answer 503 until it is back.
  let state = Arc::new(AppState::open(&cfg.store).await);

  let app = build_router(state.clone(), &cfg.server.static_dir);

  let addr = SocketAddr::from(([0, 0, 0, 0], cfg.server.port));
  let listener = TcpListener::bind(addr).await?;
  info!(target: "codegrader_backend", %addr, backend = state.store.backend(), "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  state.shutdown().await;
  info!(target: "codegrader_backend", "Server stopped");
  Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!(target: "codegrader_backend", error = %e, "Failed to listen for Ctrl-C");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
      Ok(mut sig) => { sig.recv().await; }
      Err(e) => {
        tracing::error!(target: "codegrader_backend", error = %e, "Failed to listen for SIGTERM");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => {},
    _ = terminate => {},
  }
  info!(target: "codegrader_backend", "Shutdown signal received");
}
