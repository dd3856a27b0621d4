//! Integration tests for `SqliteStore` against an in-memory database.

use mentora_core::{
  mentor::NewMentor,
  store::RosterStore,
  student::{BatchSummary, NewStudent},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_student(name: &str) -> NewStudent {
  NewStudent::try_new(
    Some(name.into()),
    Some(format!("{}@example.com", name.to_lowercase())),
  )
  .unwrap()
}

fn new_mentor(name: &str) -> NewMentor {
  NewMentor {
    name:  Some(name.into()),
    email: Some(format!("{}@example.com", name.to_lowercase())),
  }
}

// ─── Mentors ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_mentor() {
  let s = store().await;

  let mentor = s.create_mentor(new_mentor("Grace")).await.unwrap();
  assert_eq!(mentor.name.as_deref(), Some("Grace"));

  let fetched = s.get_mentor(mentor.id).await.unwrap().unwrap();
  assert_eq!(fetched, mentor);
}

#[tokio::test]
async fn mentor_fields_are_optional() {
  let s = store().await;

  let mentor = s.create_mentor(NewMentor::default()).await.unwrap();
  let fetched = s.get_mentor(mentor.id).await.unwrap().unwrap();
  assert!(fetched.name.is_none());
  assert!(fetched.email.is_none());
}

#[tokio::test]
async fn get_mentor_missing_returns_none() {
  let s = store().await;
  assert!(s.get_mentor(Uuid::new_v4()).await.unwrap().is_none());
}

// ─── Students ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_student_is_unassigned() {
  let s = store().await;

  let student = s.create_student(new_student("Ada")).await.unwrap();
  assert!(student.mentor.is_none());
  assert!(student.mentor_history.is_empty());

  let fetched = s.get_student(student.id).await.unwrap().unwrap();
  assert_eq!(fetched, student);
}

#[tokio::test]
async fn get_student_missing_returns_none() {
  let s = store().await;
  assert!(s.get_student(Uuid::new_v4()).await.unwrap().is_none());
}

// ─── Direct assignment ───────────────────────────────────────────────────────

#[tokio::test]
async fn assign_mentor_sets_reference_without_history() {
  let s = store().await;
  let student = s.create_student(new_student("Ada")).await.unwrap();
  let m1 = s.create_mentor(new_mentor("Grace")).await.unwrap();
  let m2 = s.create_mentor(new_mentor("Barbara")).await.unwrap();

  s.assign_mentor(student.id, m1.id).await.unwrap().unwrap();
  let updated = s.assign_mentor(student.id, m2.id).await.unwrap().unwrap();

  assert_eq!(updated.mentor, Some(m2.id));
  assert!(updated.mentor_history.is_empty());
}

#[tokio::test]
async fn assign_mentor_does_not_check_mentor_exists() {
  let s = store().await;
  let student = s.create_student(new_student("Ada")).await.unwrap();
  let ghost = Uuid::new_v4();

  let updated = s.assign_mentor(student.id, ghost).await.unwrap().unwrap();
  assert_eq!(updated.mentor, Some(ghost));
}

#[tokio::test]
async fn assign_mentor_unknown_student_returns_none() {
  let s = store().await;
  let result = s.assign_mentor(Uuid::new_v4(), Uuid::new_v4()).await.unwrap();
  assert!(result.is_none());
}

// ─── Bulk assignment ─────────────────────────────────────────────────────────

#[tokio::test]
async fn assign_mentor_many_updates_every_listed_student() {
  let s = store().await;
  let mentor = s.create_mentor(new_mentor("Grace")).await.unwrap();
  let a = s.create_student(new_student("Ada")).await.unwrap();
  let b = s.create_student(new_student("Alan")).await.unwrap();
  let c = s.create_student(new_student("Edsger")).await.unwrap();
  let untouched = s.create_student(new_student("Donald")).await.unwrap();

  let summary = s
    .assign_mentor_many(&[a.id, b.id, c.id], mentor.id)
    .await
    .unwrap();
  assert_eq!(summary, BatchSummary { matched_count: 3, modified_count: 3 });

  let listed = s.list_by_mentor(mentor.id).await.unwrap();
  let ids: Vec<Uuid> = listed.iter().map(|st| st.id).collect();
  assert_eq!(ids, vec![a.id, b.id, c.id]);
  assert!(listed.iter().all(|st| st.mentor_history.is_empty()));

  let other = s.get_student(untouched.id).await.unwrap().unwrap();
  assert!(other.mentor.is_none());
}

#[tokio::test]
async fn assign_mentor_many_counts_matched_and_modified() {
  let s = store().await;
  let mentor = s.create_mentor(new_mentor("Grace")).await.unwrap();
  let a = s.create_student(new_student("Ada")).await.unwrap();
  let b = s.create_student(new_student("Alan")).await.unwrap();
  s.assign_mentor(a.id, mentor.id).await.unwrap();

  let summary = s
    .assign_mentor_many(&[a.id, b.id, b.id, Uuid::new_v4()], mentor.id)
    .await
    .unwrap();
  assert_eq!(summary, BatchSummary { matched_count: 2, modified_count: 1 });
}

#[tokio::test]
async fn assign_mentor_many_empty_is_noop() {
  let s = store().await;
  let summary = s.assign_mentor_many(&[], Uuid::new_v4()).await.unwrap();
  assert_eq!(summary, BatchSummary::default());
}

#[tokio::test]
async fn assign_mentor_many_handles_batches_past_sqlite_variable_limit() {
  let s = store().await;
  let mentor = s.create_mentor(new_mentor("Grace")).await.unwrap();
  let real = s.create_student(new_student("Ada")).await.unwrap();

  let mut ids: Vec<Uuid> = (0..40_000).map(|_| Uuid::new_v4()).collect();
  ids.push(real.id);

  let summary = s.assign_mentor_many(&ids, mentor.id).await.unwrap();
  assert_eq!(summary, BatchSummary { matched_count: 1, modified_count: 1 });

  let fetched = s.get_student(real.id).await.unwrap().unwrap();
  assert_eq!(fetched.mentor, Some(mentor.id));
}

// ─── Reassignment with history ───────────────────────────────────────────────

#[tokio::test]
async fn reassign_unassigned_student_records_no_history() {
  let s = store().await;
  let student = s.create_student(new_student("Ada")).await.unwrap();
  let mentor = s.create_mentor(new_mentor("Grace")).await.unwrap();

  let updated = s.reassign_mentor(student.id, mentor.id).await.unwrap().unwrap();
  assert_eq!(updated.mentor, Some(mentor.id));
  assert!(updated.mentor_history.is_empty());
}

#[tokio::test]
async fn reassign_appends_previous_mentors_in_order() {
  let s = store().await;
  let student = s.create_student(new_student("Ada")).await.unwrap();
  let m1 = s.create_mentor(new_mentor("Grace")).await.unwrap();
  let m2 = s.create_mentor(new_mentor("Barbara")).await.unwrap();
  let m3 = s.create_mentor(new_mentor("Frances")).await.unwrap();

  s.assign_mentor(student.id, m1.id).await.unwrap();

  let after_first = s.reassign_mentor(student.id, m2.id).await.unwrap().unwrap();
  assert_eq!(after_first.mentor, Some(m2.id));
  assert_eq!(after_first.mentor_history.len(), 1);
  assert_eq!(after_first.mentor_history[0].mentor, m1.id);

  let after_second = s.reassign_mentor(student.id, m3.id).await.unwrap().unwrap();
  assert_eq!(after_second.mentor, Some(m3.id));
  let previous: Vec<Uuid> =
    after_second.mentor_history.iter().map(|e| e.mentor).collect();
  assert_eq!(previous, vec![m1.id, m2.id]);
  assert!(
    after_second.mentor_history[0].assigned_at
      <= after_second.mentor_history[1].assigned_at
  );

  // History survives a fresh read.
  let fetched = s.get_student(student.id).await.unwrap().unwrap();
  assert_eq!(fetched.mentor_history, after_second.mentor_history);
}

#[tokio::test]
async fn reassign_to_same_mentor_still_appends() {
  let s = store().await;
  let student = s.create_student(new_student("Ada")).await.unwrap();
  let mentor = s.create_mentor(new_mentor("Grace")).await.unwrap();
  s.assign_mentor(student.id, mentor.id).await.unwrap();

  let updated = s.reassign_mentor(student.id, mentor.id).await.unwrap().unwrap();
  assert_eq!(updated.mentor, Some(mentor.id));
  assert_eq!(updated.mentor_history.len(), 1);
  assert_eq!(updated.mentor_history[0].mentor, mentor.id);
}

#[tokio::test]
async fn reassign_unknown_student_returns_none() {
  let s = store().await;
  let result = s
    .reassign_mentor(Uuid::new_v4(), Uuid::new_v4())
    .await
    .unwrap();
  assert!(result.is_none());
}

// ─── Queries ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_unassigned_excludes_students_with_mentor() {
  let s = store().await;
  let mentor = s.create_mentor(new_mentor("Grace")).await.unwrap();
  let a = s.create_student(new_student("Ada")).await.unwrap();
  let b = s.create_student(new_student("Alan")).await.unwrap();
  let c = s.create_student(new_student("Edsger")).await.unwrap();
  s.assign_mentor(b.id, mentor.id).await.unwrap();

  let unassigned = s.list_unassigned().await.unwrap();
  let ids: Vec<Uuid> = unassigned.iter().map(|st| st.id).collect();
  assert_eq!(ids, vec![a.id, c.id]);
}

#[tokio::test]
async fn list_by_mentor_unknown_mentor_is_empty() {
  let s = store().await;
  s.create_student(new_student("Ada")).await.unwrap();
  assert!(s.list_by_mentor(Uuid::new_v4()).await.unwrap().is_empty());
}

#[tokio::test]
async fn current_mentor_resolves_full_record() {
  let s = store().await;
  let student = s.create_student(new_student("Ada")).await.unwrap();
  let m1 = s.create_mentor(new_mentor("Grace")).await.unwrap();
  let m2 = s.create_mentor(new_mentor("Barbara")).await.unwrap();
  s.assign_mentor(student.id, m1.id).await.unwrap();
  s.reassign_mentor(student.id, m2.id).await.unwrap();

  let resolved = s.current_mentor(student.id).await.unwrap();
  assert_eq!(resolved, Some(Some(m2)));
}

#[tokio::test]
async fn current_mentor_unassigned_or_dangling_is_inner_none() {
  let s = store().await;
  let student = s.create_student(new_student("Ada")).await.unwrap();
  assert_eq!(s.current_mentor(student.id).await.unwrap(), Some(None));

  s.assign_mentor(student.id, Uuid::new_v4()).await.unwrap();
  assert_eq!(s.current_mentor(student.id).await.unwrap(), Some(None));
}

#[tokio::test]
async fn current_mentor_unknown_student_is_outer_none() {
  let s = store().await;
  assert_eq!(s.current_mentor(Uuid::new_v4()).await.unwrap(), None);
}

#[tokio::test]
async fn reopening_file_store_keeps_records() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("roster.db");

  let student_id = {
    let s = SqliteStore::open(&path).await.unwrap();
    s.create_student(new_student("Ada")).await.unwrap().id
  };

  let s = SqliteStore::open(&path).await.unwrap();
  let fetched = s.get_student(student_id).await.unwrap().unwrap();
  assert_eq!(fetched.id, student_id);
}
