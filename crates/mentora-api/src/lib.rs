//! JSON REST API for Mentora.
//!
//! Exposes an axum [`Router`] backed by any
//! [`mentora_core::store::RosterStore`]. Transport and logging layers are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = mentora_api::api_router(Arc::new(store));
//! ```

pub mod assignments;
pub mod error;
pub mod extract;
pub mod mentors;
pub mod students;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use mentora_core::store::RosterStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RosterStore + 'static,
{
  Router::new()
    // Records
    .route("/mentors", post(mentors::create::<S>))
    .route("/mentors/{id}", get(mentors::get_one::<S>))
    .route("/students", post(students::create::<S>))
    .route("/students/{id}", get(students::get_one::<S>))
    .route("/newstudents", get(students::list_unassigned::<S>))
    .route(
      "/previous-mentor/{student_id}",
      get(students::previous_mentor::<S>),
    )
    // Assignments
    .route(
      "/assign-student/{mentor_id}/{student_id}",
      put(assignments::assign_student::<S>),
    )
    .route("/add-students/{mentor_id}", put(assignments::add_students::<S>))
    .route(
      "/change-mentor/{student_id}/{new_mentor_id}",
      put(assignments::change_mentor::<S>),
    )
    .route(
      "/assign-mentor/{student_id}/{mentor_id}",
      put(assignments::assign_mentor::<S>),
    )
    .route(
      "/mentor-students/{mentor_id}",
      get(assignments::mentor_students::<S>),
    )
    .with_state(store)
}
