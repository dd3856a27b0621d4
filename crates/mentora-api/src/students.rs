//! Handlers for student records.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/students` | Body: `{"name":"..","email":".."}`, both required; 201 |
//! | `GET`  | `/students/:id` | 404 if not found |
//! | `GET`  | `/newstudents` | Students without a mentor |
//! | `GET`  | `/previous-mentor/:student_id` | The *current* mentor, resolved |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use mentora_core::{
  mentor::Mentor,
  store::RosterStore,
  student::{NewStudent, Student},
};
use serde::Deserialize;

use crate::{
  error::{ApiError, parse_id, student_not_found},
  extract::JsonBody,
};

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct CreateBody {
  pub name:  Option<String>,
  pub email: Option<String>,
}

/// `POST /students`. Rejects a missing or empty name or email before
/// touching the store.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RosterStore,
{
  tracing::debug!(name = ?body.name, email = ?body.email, "create student");

  let input = NewStudent::try_new(body.name, body.email)
    .map_err(|_| ApiError::BadRequest("Name and email are required.".to_owned()))?;

  let student = store
    .create_student(input)
    .await
    .map_err(|e| ApiError::Rejected(Box::new(e)))?;
  tracing::info!(student_id = %student.id, "created student");
  Ok((StatusCode::CREATED, Json(student)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /students/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Student>, ApiError>
where
  S: RosterStore,
{
  let id = parse_id(&id, "studentId")?;
  let student = store
    .get_student(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(student_not_found)?;
  Ok(Json(student))
}

// ─── Unassigned ───────────────────────────────────────────────────────────────

/// `GET /newstudents`
pub async fn list_unassigned<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Student>>, ApiError>
where
  S: RosterStore,
{
  let students = store
    .list_unassigned()
    .await
    .map_err(|e| ApiError::Rejected(Box::new(e)))?;
  Ok(Json(students))
}

// ─── Previous mentor ──────────────────────────────────────────────────────────

/// `GET /previous-mentor/:student_id`
///
/// Returns the student's current mentor as a full record, not an entry from
/// the history. The body is `null` when the student is unassigned or its
/// mentor is not stored.
pub async fn previous_mentor<S>(
  State(store): State<Arc<S>>,
  Path(student_id): Path<String>,
) -> Result<Json<Option<Mentor>>, ApiError>
where
  S: RosterStore,
{
  let student_id = parse_id(&student_id, "studentId")?;
  let mentor = store
    .current_mentor(student_id)
    .await
    .map_err(|e| ApiError::Rejected(Box::new(e)))?
    .ok_or_else(student_not_found)?;
  Ok(Json(mentor))
}
