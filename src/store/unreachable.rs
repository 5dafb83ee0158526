//! Stand-in for a store whose client could not be built at startup
//! (e.g. an SRV lookup that failed). Every call reports the original failure.

use axum::async_trait;

use super::{QuestionStore, Result, StoreError};
use crate::domain::{NewQuestion, Question};

pub struct UnreachableStore {
    backend: &'static str,
    reason: String,
}

impl UnreachableStore {
    pub fn new(backend: &'static str, reason: impl Into<String>) -> Self {
        Self { backend, reason: reason.into() }
    }

    fn err(&self) -> StoreError {
        StoreError::Unavailable(self.reason.clone())
    }
}

#[async_trait]
impl QuestionStore for UnreachableStore {
    async fn insert(&self, _new: NewQuestion) -> Result<Question> {
        Err(self.err())
    }

    async fn list_all(&self) -> Result<Vec<Question>> {
        Err(self.err())
    }

    async fn ping(&self) -> Result<()> {
        Err(self.err())
    }

    fn backend(&self) -> &'static str {
        self.backend
    }
}
