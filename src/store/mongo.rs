//! MongoDB-backed question store.
//!
//! One collection, one document per question. The question id is stored as the
//! document `_id` (a UUID string) so nothing else needs an index.

use axum::async_trait;
use futures::TryStreamExt;
use mongodb::{
  bson::doc,
  error::{Error as MongoError, ErrorKind},
  options::ClientOptions,
  Client, Collection,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::{new_question_id, QuestionStore, Result, StoreError};
use crate::domain::{NewQuestion, Question};

/// On-disk shape: same fields as `Question`, with the id under `_id`.
#[derive(Debug, Serialize, Deserialize)]
struct StoredQuestion {
  #[serde(rename = "_id")]
  id: String,
  #[serde(flatten)]
  body: NewQuestion,
}

impl From<StoredQuestion> for Question {
  fn from(s: StoredQuestion) -> Self {
    s.body.with_id(s.id)
  }
}

impl From<MongoError> for StoreError {
  fn from(e: MongoError) -> Self {
    match *e.kind {
      ErrorKind::BsonDeserialization(_) => StoreError::Corrupt(e.to_string()),
      _ => StoreError::Unavailable(e.to_string()),
    }
  }
}

pub const MONGO_BACKEND: &str = "mongodb";

#[derive(Clone)]
pub struct MongoStore {
  client: Client,
  database: String,
  questions: Collection<StoredQuestion>,
}

impl MongoStore {
  /// Build the client. The driver connects lazily, so this fails only on a
  /// malformed URI or a failed `mongodb+srv://` lookup; reachability of the
  /// servers is checked with `ping`.
  #[instrument(level = "info", skip(uri))]
  pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self> {
    let mut opts = ClientOptions::parse(uri).await?;
    opts.app_name = Some("codegrader-backend".into());
    let client = Client::with_options(opts)?;
    let questions = client.database(database).collection::<StoredQuestion>(collection);
    info!(target: "codegrader_backend", %database, %collection, "MongoDB client created");
    Ok(Self { client, database: database.to_string(), questions })
  }
}

#[async_trait]
impl QuestionStore for MongoStore {
  #[instrument(level = "debug", skip(self, new))]
  async fn insert(&self, new: NewQuestion) -> Result<Question> {
    let stored = StoredQuestion { id: new_question_id(), body: new };
    self.questions.insert_one(&stored, None).await?;
    debug!(target: "codegrader_backend", id = %stored.id, "Question stored in MongoDB");
    Ok(stored.into())
  }

  #[instrument(level = "debug", skip(self))]
  async fn list_all(&self) -> Result<Vec<Question>> {
    let cursor = self.questions.find(None, None).await?;
    let stored: Vec<StoredQuestion> = cursor.try_collect().await?;
    debug!(target: "codegrader_backend", count = stored.len(), "Questions read from MongoDB");
    Ok(stored.into_iter().map(Question::from).collect())
  }

  async fn ping(&self) -> Result<()> {
    self.client.database(&self.database).run_command(doc! { "ping": 1 }, None).await?;
    Ok(())
  }

  async fn close(&self) {
    self.client.clone().shutdown().await;
    info!(target: "codegrader_backend", "MongoDB client shut down");
  }

  fn backend(&self) -> &'static str {
    MONGO_BACKEND
  }
}
