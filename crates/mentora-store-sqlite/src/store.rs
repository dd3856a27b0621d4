//! [`SqliteStore`]: the SQLite implementation of [`RosterStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use mentora_core::{
  mentor::{Mentor, NewMentor},
  store::RosterStore,
  student::{BatchSummary, NewStudent, Student},
};

use crate::{
  encode::{
    encode_dt, encode_id_list, encode_uuid, RawHistoryEntry, RawMentor, RawStudent,
  },
  schema::SCHEMA,
  Result,
};

// ─── Row helpers ─────────────────────────────────────────────────────────────

const STUDENT_COLUMNS: &str = "student_id, name, email, mentor_id";

fn read_student_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawStudent> {
  Ok(RawStudent {
    student_id: row.get(0)?,
    name:       row.get(1)?,
    email:      row.get(2)?,
    mentor_id:  row.get(3)?,
    history:    Vec::new(),
  })
}

fn read_mentor_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawMentor> {
  Ok(RawMentor {
    mentor_id: row.get(0)?,
    name:      row.get(1)?,
    email:     row.get(2)?,
  })
}

fn load_history(
  conn: &rusqlite::Connection,
  student_id: &str,
) -> rusqlite::Result<Vec<RawHistoryEntry>> {
  let mut stmt = conn.prepare_cached(
    "SELECT mentor_id, assigned_at FROM mentor_history
     WHERE student_id = ?1
     ORDER BY history_id",
  )?;
  stmt
    .query_map(rusqlite::params![student_id], |row| {
      Ok(RawHistoryEntry {
        mentor_id:   row.get(0)?,
        assigned_at: row.get(1)?,
      })
    })?
    .collect()
}

fn fetch_student(
  conn: &rusqlite::Connection,
  student_id: &str,
) -> rusqlite::Result<Option<RawStudent>> {
  let raw = conn
    .query_row(
      &format!("SELECT {STUDENT_COLUMNS} FROM students WHERE student_id = ?1"),
      rusqlite::params![student_id],
      read_student_row,
    )
    .optional()?;

  match raw {
    Some(mut raw) => {
      raw.history = load_history(conn, student_id)?;
      Ok(Some(raw))
    }
    None => Ok(None),
  }
}

/// Select students matching `where_clause` in insertion order, each with its
/// history attached.
fn query_students<P: rusqlite::Params>(
  conn: &rusqlite::Connection,
  where_clause: &str,
  params: P,
) -> rusqlite::Result<Vec<RawStudent>> {
  let sql = format!(
    "SELECT {STUDENT_COLUMNS} FROM students {where_clause} ORDER BY rowid"
  );
  let mut stmt = conn.prepare(&sql)?;
  let mut rows = stmt
    .query_map(params, read_student_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  for raw in &mut rows {
    raw.history = load_history(conn, &raw.student_id)?;
  }
  Ok(rows)
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Mentora roster store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "opening sqlite store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── RosterStore impl ────────────────────────────────────────────────────────

impl RosterStore for SqliteStore {
  type Error = crate::Error;

  // ── Mentors ───────────────────────────────────────────────────────────────

  async fn create_mentor(&self, input: NewMentor) -> Result<Mentor> {
    let mentor = Mentor {
      id:    Uuid::new_v4(),
      name:  input.name,
      email: input.email,
    };

    let id_str = encode_uuid(mentor.id);
    let name   = mentor.name.clone();
    let email  = mentor.email.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO mentors (mentor_id, name, email) VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, name, email],
        )?;
        Ok(())
      })
      .await?;

    Ok(mentor)
  }

  async fn get_mentor(&self, id: Uuid) -> Result<Option<Mentor>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawMentor> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT mentor_id, name, email FROM mentors WHERE mentor_id = ?1",
            rusqlite::params![id_str],
            read_mentor_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawMentor::into_mentor).transpose()
  }

  // ── Students ──────────────────────────────────────────────────────────────

  async fn create_student(&self, input: NewStudent) -> Result<Student> {
    let student = Student {
      id:             Uuid::new_v4(),
      name:           input.name,
      email:          input.email,
      mentor:         None,
      mentor_history: Vec::new(),
    };

    let id_str = encode_uuid(student.id);
    let name   = student.name.clone();
    let email  = student.email.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO students (student_id, name, email) VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, name, email],
        )?;
        Ok(())
      })
      .await?;

    Ok(student)
  }

  async fn get_student(&self, id: Uuid) -> Result<Option<Student>> {
    let id_str = encode_uuid(id);

    let raw = self
      .conn
      .call(move |conn| Ok(fetch_student(conn, &id_str)?))
      .await?;

    raw.map(RawStudent::into_student).transpose()
  }

  async fn assign_mentor(
    &self,
    student_id: Uuid,
    mentor_id:  Uuid,
  ) -> Result<Option<Student>> {
    let sid = encode_uuid(student_id);
    let mid = encode_uuid(mentor_id);

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let updated = tx.execute(
          "UPDATE students SET mentor_id = ?1 WHERE student_id = ?2",
          rusqlite::params![mid, sid],
        )?;
        if updated == 0 {
          return Ok(None);
        }
        let raw = fetch_student(&tx, &sid)?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.map(RawStudent::into_student).transpose()
  }

  async fn assign_mentor_many(
    &self,
    student_ids: &[Uuid],
    mentor_id:   Uuid,
  ) -> Result<BatchSummary> {
    let mut ids: Vec<String> =
      student_ids.iter().copied().map(encode_uuid).collect();
    ids.sort_unstable();
    ids.dedup();

    if ids.is_empty() {
      return Ok(BatchSummary::default());
    }

    let mid      = encode_uuid(mentor_id);
    let ids_json = encode_id_list(&ids)?;

    let (matched, modified) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let matched: i64 = tx.query_row(
          "SELECT COUNT(*) FROM students
           WHERE student_id IN (SELECT value FROM json_each(?1))",
          rusqlite::params![ids_json],
          |r| r.get(0),
        )?;

        let modified = tx.execute(
          "UPDATE students SET mentor_id = ?1
           WHERE student_id IN (SELECT value FROM json_each(?2))
             AND mentor_id IS NOT ?1",
          rusqlite::params![mid, ids_json],
        )?;

        tx.commit()?;
        Ok((matched, modified))
      })
      .await?;

    Ok(BatchSummary {
      matched_count:  matched as u64,
      modified_count: modified as u64,
    })
  }

  async fn reassign_mentor(
    &self,
    student_id:    Uuid,
    new_mentor_id: Uuid,
  ) -> Result<Option<Student>> {
    let sid    = encode_uuid(student_id);
    let mid    = encode_uuid(new_mentor_id);
    let at_str = encode_dt(Utc::now());

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let current: Option<Option<String>> = tx
          .query_row(
            "SELECT mentor_id FROM students WHERE student_id = ?1",
            rusqlite::params![sid],
            |r| r.get(0),
          )
          .optional()?;

        let Some(current) = current else {
          return Ok(None);
        };

        if let Some(previous) = current {
          tx.execute(
            "INSERT INTO mentor_history (student_id, mentor_id, assigned_at)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![sid, previous, at_str],
          )?;
        }

        tx.execute(
          "UPDATE students SET mentor_id = ?1 WHERE student_id = ?2",
          rusqlite::params![mid, sid],
        )?;

        let raw = fetch_student(&tx, &sid)?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.map(RawStudent::into_student).transpose()
  }

  // ── Queries ───────────────────────────────────────────────────────────────

  async fn list_unassigned(&self) -> Result<Vec<Student>> {
    let raws = self
      .conn
      .call(|conn| Ok(query_students(conn, "WHERE mentor_id IS NULL", [])?))
      .await?;

    raws.into_iter().map(RawStudent::into_student).collect()
  }

  async fn list_by_mentor(&self, mentor_id: Uuid) -> Result<Vec<Student>> {
    let mid = encode_uuid(mentor_id);

    let raws = self
      .conn
      .call(move |conn| {
        Ok(query_students(
          conn,
          "WHERE mentor_id = ?1",
          rusqlite::params![mid],
        )?)
      })
      .await?;

    raws.into_iter().map(RawStudent::into_student).collect()
  }

  async fn current_mentor(
    &self,
    student_id: Uuid,
  ) -> Result<Option<Option<Mentor>>> {
    let sid = encode_uuid(student_id);

    let raw: Option<Option<RawMentor>> = self
      .conn
      .call(move |conn| {
        let reference: Option<Option<String>> = conn
          .query_row(
            "SELECT mentor_id FROM students WHERE student_id = ?1",
            rusqlite::params![sid],
            |r| r.get(0),
          )
          .optional()?;

        match reference {
          None => Ok(None),
          Some(None) => Ok(Some(None)),
          Some(Some(mid)) => {
            let mentor = conn
              .query_row(
                "SELECT mentor_id, name, email FROM mentors WHERE mentor_id = ?1",
                rusqlite::params![mid],
                read_mentor_row,
              )
              .optional()?;
            Ok(Some(mentor))
          }
        }
      })
      .await?;

    raw
      .map(|m| m.map(RawMentor::into_mentor).transpose())
      .transpose()
  }
}
