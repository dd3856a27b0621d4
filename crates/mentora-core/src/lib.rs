//! Core types and trait definitions for the Mentora roster service.
//!
//! This crate is free of HTTP and database dependencies. The store backend
//! and the API layer both depend on it.

pub mod error;
pub mod mentor;
pub mod store;
pub mod student;

pub use error::{Error, Result};
