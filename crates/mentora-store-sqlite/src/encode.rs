//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings; UUIDs are hyphenated lowercase strings;
//! id lists are compact JSON arrays.

use chrono::{DateTime, Utc};
use mentora_core::{
  mentor::Mentor,
  student::{MentorHistoryEntry, Student},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

/// A JSON array of encoded ids. Bound as one parameter and expanded in SQL
/// with `json_each`.
pub fn encode_id_list(ids: &[String]) -> Result<String> {
  Ok(serde_json::to_string(ids)?)
}

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `mentors` row.
pub struct RawMentor {
  pub mentor_id: String,
  pub name:      Option<String>,
  pub email:     Option<String>,
}

impl RawMentor {
  pub fn into_mentor(self) -> Result<Mentor> {
    Ok(Mentor {
      id:    decode_uuid(&self.mentor_id)?,
      name:  self.name,
      email: self.email,
    })
  }
}

/// Raw strings read from a `mentor_history` row.
pub struct RawHistoryEntry {
  pub mentor_id:   String,
  pub assigned_at: String,
}

impl RawHistoryEntry {
  pub fn into_entry(self) -> Result<MentorHistoryEntry> {
    Ok(MentorHistoryEntry {
      mentor:      decode_uuid(&self.mentor_id)?,
      assigned_at: decode_dt(&self.assigned_at)?,
    })
  }
}

/// A `students` row together with its history rows.
pub struct RawStudent {
  pub student_id: String,
  pub name:       String,
  pub email:      String,
  pub mentor_id:  Option<String>,
  pub history:    Vec<RawHistoryEntry>,
}

impl RawStudent {
  pub fn into_student(self) -> Result<Student> {
    Ok(Student {
      id:             decode_uuid(&self.student_id)?,
      name:           self.name,
      email:          self.email,
      mentor:         self.mentor_id.as_deref().map(decode_uuid).transpose()?,
      mentor_history: self
        .history
        .into_iter()
        .map(RawHistoryEntry::into_entry)
        .collect::<Result<_>>()?,
    })
  }
}
