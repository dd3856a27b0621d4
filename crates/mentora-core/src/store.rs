//! The `RosterStore` trait.
//!
//! Implemented by storage backends (e.g. `mentora-store-sqlite`). The API
//! layer depends on this abstraction, not on any concrete backend.
//!
//! Lookups that target a single student return `Ok(None)` when the student
//! does not exist, so every caller sees the same found / not-found / failed
//! split. Mentor ids written onto students are never checked against the
//! mentor collection.

use std::future::Future;

use uuid::Uuid;

use crate::{
  mentor::{Mentor, NewMentor},
  student::{BatchSummary, NewStudent, Student},
};

/// Abstraction over a roster store backend.
///
/// All methods return `Send` futures so the trait can be used behind `axum`
/// on a multi-threaded tokio runtime.
pub trait RosterStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Mentors ───────────────────────────────────────────────────────────

  /// Persist a new mentor under a freshly assigned id.
  fn create_mentor(
    &self,
    input: NewMentor,
  ) -> impl Future<Output = Result<Mentor, Self::Error>> + Send + '_;

  /// Retrieve a mentor by id. Returns `None` if not found.
  fn get_mentor(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Mentor>, Self::Error>> + Send + '_;

  // ── Students ──────────────────────────────────────────────────────────

  /// Persist a new, unassigned student with an empty history.
  fn create_student(
    &self,
    input: NewStudent,
  ) -> impl Future<Output = Result<Student, Self::Error>> + Send + '_;

  /// Retrieve a student, history included. Returns `None` if not found.
  fn get_student(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Student>, Self::Error>> + Send + '_;

  /// Overwrite the student's mentor. History is left untouched.
  fn assign_mentor(
    &self,
    student_id: Uuid,
    mentor_id: Uuid,
  ) -> impl Future<Output = Result<Option<Student>, Self::Error>> + Send + '_;

  /// Set `mentor_id` on every listed student in one batched update.
  ///
  /// Unknown ids are skipped silently; duplicates count once.
  fn assign_mentor_many<'a>(
    &'a self,
    student_ids: &'a [Uuid],
    mentor_id: Uuid,
  ) -> impl Future<Output = Result<BatchSummary, Self::Error>> + Send + 'a;

  /// Replace the student's mentor, first appending the current mentor (if
  /// any) to the history with the current time.
  ///
  /// Reassigning to the same mentor still appends an entry.
  fn reassign_mentor(
    &self,
    student_id: Uuid,
    new_mentor_id: Uuid,
  ) -> impl Future<Output = Result<Option<Student>, Self::Error>> + Send + '_;

  // ── Queries ───────────────────────────────────────────────────────────

  /// Students with no mentor, in insertion order.
  fn list_unassigned(
    &self,
  ) -> impl Future<Output = Result<Vec<Student>, Self::Error>> + Send + '_;

  /// Students whose current mentor is `mentor_id`, in insertion order.
  fn list_by_mentor(
    &self,
    mentor_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Student>, Self::Error>> + Send + '_;

  /// Resolve the student's current mentor reference to a full record.
  ///
  /// The outer `None` means the student does not exist; the inner `None`
  /// means it is unassigned or points at a mentor that is not stored.
  fn current_mentor(
    &self,
    student_id: Uuid,
  ) -> impl Future<Output = Result<Option<Option<Mentor>>, Self::Error>> + Send + '_;
}
