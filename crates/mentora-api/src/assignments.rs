//! Handlers that move students between mentors.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `PUT` | `/assign-student/:mentor_id/:student_id` | No history |
//! | `PUT` | `/add-students/:mentor_id` | Body: `{"students":[ids]}`; batch summary |
//! | `PUT` | `/change-mentor/:student_id/:new_mentor_id` | Appends previous mentor to history |
//! | `PUT` | `/assign-mentor/:student_id/:mentor_id` | No history |
//! | `GET` | `/mentor-students/:mentor_id` | Students of one mentor |
//!
//! Mentor ids are never checked against the mentor collection.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use mentora_core::{
  store::RosterStore,
  student::{BatchSummary, Student},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  error::{ApiError, parse_id, student_not_found},
  extract::JsonBody,
};

// ─── Single assignment ────────────────────────────────────────────────────────

/// `PUT /assign-student/:mentor_id/:student_id`
pub async fn assign_student<S>(
  State(store): State<Arc<S>>,
  Path((mentor_id, student_id)): Path<(String, String)>,
) -> Result<Json<Student>, ApiError>
where
  S: RosterStore,
{
  tracing::debug!(%mentor_id, %student_id, "assign student to mentor");

  let (Ok(mentor_id), Ok(student_id)) =
    (Uuid::parse_str(&mentor_id), Uuid::parse_str(&student_id))
  else {
    return Err(ApiError::BadRequest(
      "Invalid mentorId or studentId.".to_owned(),
    ));
  };

  let student = store
    .assign_mentor(student_id, mentor_id)
    .await
    .map_err(|e| ApiError::Rejected(Box::new(e)))?
    .ok_or_else(student_not_found)?;
  Ok(Json(student))
}

/// `PUT /assign-mentor/:student_id/:mentor_id`: same effect as
/// [`assign_student`] with the parameters swapped.
pub async fn assign_mentor<S>(
  State(store): State<Arc<S>>,
  Path((student_id, mentor_id)): Path<(String, String)>,
) -> Result<Json<Student>, ApiError>
where
  S: RosterStore,
{
  let student_id = parse_id(&student_id, "studentId")?;
  let mentor_id = parse_id(&mentor_id, "mentorId")?;

  let student = store
    .assign_mentor(student_id, mentor_id)
    .await
    .map_err(|e| ApiError::Rejected(Box::new(e)))?
    .ok_or_else(student_not_found)?;
  Ok(Json(student))
}

// ─── Bulk assignment ──────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct AddStudentsBody {
  #[serde(default)]
  pub students: Option<Vec<String>>,
}

/// `PUT /add-students/:mentor_id`, body: `{"students":["<id>", ...]}`.
///
/// Unknown student ids are skipped; the summary reports how many matched.
pub async fn add_students<S>(
  State(store): State<Arc<S>>,
  Path(mentor_id): Path<String>,
  JsonBody(body): JsonBody<AddStudentsBody>,
) -> Result<Json<BatchSummary>, ApiError>
where
  S: RosterStore,
{
  let mentor_id = parse_id(&mentor_id, "mentorId")?;
  let raw_ids = body.students.ok_or_else(|| {
    ApiError::BadRequest("students must be an array of student ids.".to_owned())
  })?;
  let student_ids = raw_ids
    .iter()
    .map(|raw| parse_id(raw, "studentId"))
    .collect::<Result<Vec<_>, _>>()?;

  let summary = store
    .assign_mentor_many(&student_ids, mentor_id)
    .await
    .map_err(|e| ApiError::Rejected(Box::new(e)))?;
  tracing::info!(
    %mentor_id,
    matched = summary.matched_count,
    modified = summary.modified_count,
    "bulk-assigned students"
  );
  Ok(Json(summary))
}

// ─── Reassignment ─────────────────────────────────────────────────────────────

/// `PUT /change-mentor/:student_id/:new_mentor_id`
pub async fn change_mentor<S>(
  State(store): State<Arc<S>>,
  Path((student_id, new_mentor_id)): Path<(String, String)>,
) -> Result<Json<Student>, ApiError>
where
  S: RosterStore,
{
  let student_id = parse_id(&student_id, "studentId")?;
  let new_mentor_id = parse_id(&new_mentor_id, "newMentorId")?;

  let student = store
    .reassign_mentor(student_id, new_mentor_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(student_not_found)?;
  Ok(Json(student))
}

// ─── Per-mentor listing ───────────────────────────────────────────────────────

/// `GET /mentor-students/:mentor_id`
pub async fn mentor_students<S>(
  State(store): State<Arc<S>>,
  Path(mentor_id): Path<String>,
) -> Result<Json<Vec<Student>>, ApiError>
where
  S: RosterStore,
{
  tracing::debug!(%mentor_id, "list students for mentor");
  let mentor_id = parse_id(&mentor_id, "mentorId")?;

  let students = store
    .list_by_mentor(mentor_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  tracing::debug!(count = students.len(), "retrieved students");
  Ok(Json(students))
}
