//! API error type and its HTTP mapping.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::protocol::ErrorOut;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
  /// Body is not JSON or a field has the wrong JSON type.
  #[error("invalid input: {0}")]
  InvalidInput(String),

  #[error(transparent)]
  Store(#[from] StoreError),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
      ApiError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
  }

  pub fn code(&self) -> &'static str {
    match self {
      ApiError::InvalidInput(_) => "invalid_input",
      ApiError::Store(_) => "store_unavailable",
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    match &self {
      ApiError::InvalidInput(msg) => warn!(target: "question", %msg, "Rejected question payload"),
      ApiError::Store(e) => error!(target: "question", error = %e, "Question store call failed"),
    }
    let body = ErrorOut { error: self.code(), message: self.to_string() };
    (status, Json(body)).into_response()
  }
}
