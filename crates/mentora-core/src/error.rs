//! Error types for `mentora-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("name and email are required")]
  MissingField,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
