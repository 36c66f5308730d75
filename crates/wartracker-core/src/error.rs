//! Error types for `wartracker-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Two comparison tables, or a table and its join columns, disagree.
  #[error("data shape mismatch: {0}")]
  DataShape(String),
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Error::DataShape(_) => ErrorKind::DataShape,
    }
  }
}

/// Broad failure classes shared by every backend.
///
/// Callers use this to decide how a failure is surfaced (e.g. which HTTP
/// status), without depending on a concrete backend error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// The database could not be opened, read, or was locked.
  Connection,
  /// The engine rejected the SQL text.
  Query,
  /// Result tables did not have the shape an operation requires.
  DataShape,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
