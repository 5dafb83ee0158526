//! Question persistence.
//!
//! Handlers only see `dyn QuestionStore`. Two backends exist:
//!   - `MemoryStore`: in-process, used when no MongoDB URI is configured (and in tests)
//!   - `MongoStore`: one MongoDB collection, opened once at startup
//!
//! If the MongoDB client cannot even be built, `UnreachableStore` takes its place.

use std::sync::Arc;

use axum::async_trait;
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::config::StoreConfig;
use crate::domain::{NewQuestion, Question};

pub mod memory;
pub mod mongo;
pub mod unreachable;

pub use memory::MemoryStore;
pub use mongo::{MongoStore, MONGO_BACKEND};
pub use unreachable::UnreachableStore;

#[derive(Error, Debug)]
pub enum StoreError {
  #[error("store unavailable: {0}")]
  Unavailable(String),
  #[error("stored document could not be decoded: {0}")]
  Corrupt(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait QuestionStore: Send + Sync {
  /// Assign a fresh id, persist, and return the stored document.
  async fn insert(&self, new: NewQuestion) -> Result<Question>;

  /// Every stored question in storage order. No filtering, no paging.
  async fn list_all(&self) -> Result<Vec<Question>>;

  /// Readiness check.
  async fn ping(&self) -> Result<()>;

  /// Release the underlying connection. Called once after the server stops.
  async fn close(&self) {}

  fn backend(&self) -> &'static str;
}

/// Fresh, globally unique question id.
pub fn new_question_id() -> String {
  uuid::Uuid::new_v4().to_string()
}

/// Open the configured backend and ping it once.
///
/// Connectivity problems never stop the process: a client that cannot be built
/// or a failed ping is logged, the server still starts, and requests report
/// the store as unavailable until it comes back.
#[instrument(level = "info", skip_all)]
pub async fn open(cfg: &StoreConfig) -> Arc<dyn QuestionStore> {
  let store: Arc<dyn QuestionStore> = match &cfg.mongo_uri {
    Some(uri) => match MongoStore::connect(uri, &cfg.database, &cfg.collection).await {
      Ok(s) => Arc::new(s),
      Err(e) => {
        error!(target: "codegrader_backend", error = %e, "Could not create MongoDB client; serving without a store");
        return Arc::new(UnreachableStore::new(MONGO_BACKEND, e.to_string()));
      }
    },
    None => {
      info!(target: "codegrader_backend", "MONGO_URI not set; questions are kept in memory only");
      Arc::new(MemoryStore::new())
    }
  };

  match store.ping().await {
    Ok(()) => info!(target: "codegrader_backend", backend = store.backend(), "Question store ready"),
    Err(e) => error!(target: "codegrader_backend", backend = store.backend(), error = %e, "Question store not reachable at startup"),
  }
  store
}
