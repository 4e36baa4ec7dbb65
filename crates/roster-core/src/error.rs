//! Shared error taxonomy for the roster service.
//!
//! Store implementations return these variants directly, so callers can tell
//! a missing resource from a uniqueness or referential conflict without a
//! second lookup.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("department not found: {0}")]
  DepartmentNotFound(i64),

  #[error("employee not found: {0}")]
  EmployeeNotFound(i64),

  #[error("department name already taken: {0:?}")]
  DuplicateDepartmentName(String),

  #[error("email already registered: {0:?}")]
  DuplicateEmail(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap an implementation-specific failure as [`Error::Store`].
  pub fn store(source: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(source))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
