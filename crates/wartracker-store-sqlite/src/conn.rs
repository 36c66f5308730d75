//! [`DbConn`]: the read-only connection factory.

use std::{
  path::PathBuf,
  sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
  },
};

use rusqlite::OpenFlags;

use crate::{Error, Result};

/// Opens a fresh read-only connection for each scope.
///
/// Construct one per process and share it by reference. Clones share the
/// open-scope counter.
#[derive(Debug, Clone)]
pub struct DbConn {
  path: PathBuf,
  open: Arc<AtomicUsize>,
}

impl DbConn {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into(), open: Arc::new(AtomicUsize::new(0)) }
  }

  /// Number of scopes whose connection has not been closed yet.
  pub fn open_scopes(&self) -> usize { self.open.load(Ordering::SeqCst) }

  /// `file:` URI that opens `path` strictly read-only.
  fn uri(&self) -> String {
    let path = self.path.to_string_lossy();
    let mut uri = String::with_capacity(path.len() + 13);
    uri.push_str("file:");
    for c in path.chars() {
      match c {
        '%' => uri.push_str("%25"),
        '?' => uri.push_str("%3F"),
        '#' => uri.push_str("%23"),
        c => uri.push(c),
      }
    }
    uri.push_str("?mode=ro");
    uri
  }

  /// Run `f` on a newly opened read-only connection.
  ///
  /// A transaction left open by `f` is committed when `f` succeeds and rolled
  /// back when it fails. The connection is closed on every path before this
  /// returns. A file that does not exist is never created.
  pub async fn scoped<F, T>(&self, f: F) -> Result<T>
  where
    F: FnOnce(&rusqlite::Connection) -> rusqlite::Result<T> + Send + 'static,
    T: Send + 'static,
  {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
      | OpenFlags::SQLITE_OPEN_URI
      | OpenFlags::SQLITE_OPEN_NO_MUTEX;

    let conn = tokio_rusqlite::Connection::open_with_flags(self.uri(), flags)
      .await
      .map_err(Error::Connection)?;
    let scope = OpenScope::enter(&self.open);
    tracing::debug!(path = %self.path.display(), "opened read-only connection");

    let outcome = conn
      .call(move |conn| {
        let result = f(conn);
        if let Err(e) = end_transaction(conn, result.is_ok()) {
          if result.is_ok() {
            return Err(e.into());
          }
          tracing::warn!(error = %e, "rollback failed");
        }
        Ok(result)
      })
      .await;

    let closed = conn.close().await;
    drop(scope);
    tracing::debug!(path = %self.path.display(), "closed connection");

    let result = match outcome {
      Ok(inner) => inner.map_err(|e| Error::from_engine(e.into())),
      Err(e) => Err(Error::from_engine(e)),
    };

    match closed {
      Err(e) if result.is_ok() => Err(Error::Connection(e)),
      Err(e) => {
        tracing::warn!(error = %e, "close failed after query error");
        result
      }
      Ok(()) => result,
    }
  }
}

/// Commit or roll back a transaction left open on `conn`. No-op in
/// autocommit mode.
fn end_transaction(conn: &rusqlite::Connection, commit: bool) -> rusqlite::Result<()> {
  if conn.is_autocommit() {
    return Ok(());
  }
  conn.execute_batch(if commit { "COMMIT" } else { "ROLLBACK" })
}

/// Counts a scope as open until dropped.
struct OpenScope<'a>(&'a AtomicUsize);

impl<'a> OpenScope<'a> {
  fn enter(counter: &'a AtomicUsize) -> Self {
    counter.fetch_add(1, Ordering::SeqCst);
    Self(counter)
  }
}

impl Drop for OpenScope<'_> {
  fn drop(&mut self) { self.0.fetch_sub(1, Ordering::SeqCst); }
}
