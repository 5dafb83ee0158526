//! Application state shared by every handler.
//!
//! Holds the question store, opened once in `main` and closed after the server
//! stops. Nothing else is shared between requests.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::config::StoreConfig;
use crate::store::{self, QuestionStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn QuestionStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }

    /// Open the configured store and ping it once.
    #[instrument(level = "info", skip_all)]
    pub async fn open(cfg: &StoreConfig) -> Self {
        Self::new(store::open(cfg).await)
    }

    /// Live readiness: true when the store answers a ping.
    pub async fn ready(&self) -> bool {
        self.store.ping().await.is_ok()
    }

    /// Release the store. Call once, after the server has stopped.
    pub async fn shutdown(&self) {
        info!(target: "codegrader_backend", backend = self.store.backend(), "Releasing question store");
        self.store.close().await;
    }
}
