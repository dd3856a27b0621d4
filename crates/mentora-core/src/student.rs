//! Student records and their mentor history.
//!
//! A student points at its current mentor by id. The reference is advisory:
//! nothing checks that the mentor exists. Past mentors are kept in an
//! append-only history, oldest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// One past assignment. `mentor` is the mentor the student had *before* a
/// reassignment; `assigned_at` is when the entry was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorHistoryEntry {
  pub mentor:      Uuid,
  pub assigned_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
  pub id:             Uuid,
  pub name:           String,
  pub email:          String,
  /// Absent means unassigned.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub mentor:         Option<Uuid>,
  #[serde(default)]
  pub mentor_history: Vec<MentorHistoryEntry>,
}

/// Validated input to [`crate::store::RosterStore::create_student`].
#[derive(Debug, Clone)]
pub struct NewStudent {
  pub name:  String,
  pub email: String,
}

impl NewStudent {
  /// Build from optional request fields. Missing or empty values are
  /// rejected.
  pub fn try_new(name: Option<String>, email: Option<String>) -> Result<Self> {
    match (name, email) {
      (Some(name), Some(email)) if !name.is_empty() && !email.is_empty() => {
        Ok(Self { name, email })
      }
      _ => Err(Error::MissingField),
    }
  }
}

/// Outcome of a bulk assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
  /// Distinct requested ids that exist in the store.
  pub matched_count:  u64,
  /// Matched students whose mentor actually changed.
  pub modified_count: u64,
}
