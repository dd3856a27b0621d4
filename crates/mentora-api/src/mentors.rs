//! Handlers for `/mentors` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/mentors` | Body: `{"name":"..","email":".."}`, both optional; 201 |
//! | `GET`  | `/mentors/:id` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use mentora_core::{
  mentor::{Mentor, NewMentor},
  store::RosterStore,
};

use crate::{
  error::{ApiError, parse_id},
  extract::JsonBody,
};

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /mentors`. Fields are stored as given, without validation.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<NewMentor>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RosterStore,
{
  let mentor = store
    .create_mentor(body)
    .await
    .map_err(|e| ApiError::Rejected(Box::new(e)))?;
  tracing::info!(mentor_id = %mentor.id, "created mentor");
  Ok((StatusCode::CREATED, Json(mentor)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /mentors/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Mentor>, ApiError>
where
  S: RosterStore,
{
  let id = parse_id(&id, "mentorId")?;
  let mentor = store
    .get_mentor(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound("Mentor not found.".to_owned()))?;
  Ok(Json(mentor))
}
