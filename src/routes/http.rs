//! HTTP endpoint handlers. Thin wrappers over the question store.
//! Each handler is instrumented and logs basic result info.

use std::sync::Arc;
use axum::{extract::{rejection::JsonRejection, State}, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::domain::{NewQuestion, Question};
use crate::error::ApiError;
use crate::protocol::HealthOut;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn http_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let ready = state.ready().await;
  Json(HealthOut { ok: true, store: state.store.backend(), ready })
}

/// POST /api/questions. Any subset of fields is accepted; wrong JSON types are not.
#[instrument(level = "info", skip(state, payload))]
pub async fn http_create_question(
  State(state): State<Arc<AppState>>,
  payload: Result<Json<NewQuestion>, JsonRejection>,
) -> Result<Json<Question>, ApiError> {
  let Json(body) = payload.map_err(|e| ApiError::InvalidInput(e.body_text()))?;
  let cases = body.test_case_count();
  let q = state.store.insert(body).await?;
  info!(target: "question", id = %q.id, test_cases = cases, "Question created");
  Ok(Json(q))
}

/// GET /api/questions. Everything, in storage order.
#[instrument(level = "info", skip(state))]
pub async fn http_list_questions(
  State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Question>>, ApiError> {
  let questions = state.store.list_all().await?;
  info!(target: "question", count = questions.len(), "Questions listed");
  Ok(Json(questions))
}
