//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error body is `{"error": "<message>"}`. Store failures come in two
//! flavours because endpoints disagree on the status they report:
//! [`ApiError::Rejected`] answers 400 with the store's message, while
//! [`ApiError::Store`] answers 500 with a fixed message and logs the cause.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("rejected by store: {0}")]
  Rejected(#[source] BoxError),

  #[error("store error: {0}")]
  Store(#[source] BoxError),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Rejected(e) => {
        tracing::warn!(error = %e, "store rejected request");
        (StatusCode::BAD_REQUEST, e.to_string())
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store operation failed");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          "Internal server error.".to_owned(),
        )
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::BadRequest(rejection.body_text())
  }
}

/// Parse a path or body identifier, naming the offending parameter on
/// failure.
pub(crate) fn parse_id(raw: &str, param: &str) -> Result<uuid::Uuid, ApiError> {
  uuid::Uuid::parse_str(raw)
    .map_err(|_| ApiError::BadRequest(format!("Invalid {param}.")))
}

pub(crate) fn student_not_found() -> ApiError {
  ApiError::NotFound("Student not found.".to_owned())
}
