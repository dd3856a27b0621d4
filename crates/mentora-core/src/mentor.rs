//! Mentor records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A mentor. Neither field is enforced; a mentor may be created empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mentor {
  pub id:    Uuid,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name:  Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub email: Option<String>,
}

/// Input to [`crate::store::RosterStore::create_mentor`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewMentor {
  pub name:  Option<String>,
  pub email: Option<String>,
}
