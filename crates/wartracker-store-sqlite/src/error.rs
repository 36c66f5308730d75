//! Error type for `wartracker-store-sqlite`.

use rusqlite::ErrorCode;
use thiserror::Error;
use wartracker_core::{ErrorKind, store::StoreError};

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] wartracker_core::Error),

  /// The database file is missing, unreadable, or locked.
  #[error("connection error: {0}")]
  Connection(#[source] tokio_rusqlite::Error),

  /// The engine rejected the statement. Displayed exactly as SQLite reports it.
  #[error(transparent)]
  Query(rusqlite::Error),
}

impl Error {
  /// Sort an engine failure into the connection or query class.
  pub(crate) fn from_engine(err: tokio_rusqlite::Error) -> Self {
    match err {
      tokio_rusqlite::Error::Rusqlite(e) if !is_connection_failure(&e) => Error::Query(e),
      other => Error::Connection(other),
    }
  }
}

fn is_connection_failure(err: &rusqlite::Error) -> bool {
  matches!(
    err.sqlite_error_code(),
    Some(
      ErrorCode::CannotOpen
        | ErrorCode::DatabaseBusy
        | ErrorCode::DatabaseLocked
        | ErrorCode::NotADatabase
        | ErrorCode::PermissionDenied
        | ErrorCode::SystemIoFailure
    )
  )
}

impl StoreError for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Error::Core(e) => e.kind(),
      Error::Connection(_) => ErrorKind::Connection,
      Error::Query(_) => ErrorKind::Query,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
