//! Turning one SQL statement into a [`QueryResult`].

use rusqlite::{Batch, Connection, types::ValueRef};
use wartracker_core::result::{Cell, QueryResult};

/// Execute the first statement in `sql` and collect its full result set.
///
/// Any statements after the first are never prepared. Text that holds no
/// statement at all (blank, or only comments), and statements without a result
/// set, produce an empty [`QueryResult`]. Engine errors are returned untouched.
pub fn materialize(conn: &Connection, sql: &str) -> rusqlite::Result<QueryResult> {
  tracing::debug!(sql, "running query");

  let mut batch = Batch::new(conn, sql);
  let Some(mut stmt) = batch.next()? else {
    return Ok(QueryResult::default());
  };

  let columns: Vec<String> = stmt.column_names().into_iter().map(str::to_owned).collect();
  let width = columns.len();

  let mut rows = stmt.query([])?;
  let mut out = Vec::new();
  while let Some(row) = rows.next()? {
    let cells = (0..width)
      .map(|i| row.get_ref(i).map(cell_from_ref))
      .collect::<rusqlite::Result<Vec<_>>>()?;
    out.push(cells);
  }

  Ok(QueryResult::new(columns, out))
}

pub(crate) fn cell_from_ref(value: ValueRef<'_>) -> Cell {
  match value {
    ValueRef::Null => Cell::Null,
    ValueRef::Integer(i) => Cell::Integer(i),
    ValueRef::Real(f) => Cell::Real(f),
    ValueRef::Text(t) => Cell::Text(String::from_utf8_lossy(t).into_owned()),
    ValueRef::Blob(b) => Cell::Blob(b.to_vec()),
  }
}
