//! In-process question store. Nothing survives a restart.

use std::sync::Arc;

use axum::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::{new_question_id, QuestionStore, Result};
use crate::domain::{NewQuestion, Question};

#[derive(Clone, Default)]
pub struct MemoryStore {
    questions: Arc<RwLock<Vec<Question>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    #[instrument(level = "debug", skip(self, new))]
    async fn insert(&self, new: NewQuestion) -> Result<Question> {
        let q = new.with_id(new_question_id());
        let mut questions = self.questions.write().await;
        questions.push(q.clone());
        debug!(target: "codegrader_backend", id = %q.id, total = questions.len(), "Question stored in memory");
        Ok(q)
    }

    #[instrument(level = "debug", skip(self))]
    async fn list_all(&self) -> Result<Vec<Question>> {
        Ok(self.questions.read().await.clone())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
