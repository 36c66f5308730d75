//! Distinct-value loading for the filter option lists.

use rusqlite::Connection;
use wartracker_core::{
  dimension::{Dimension, LOSS_TABLE},
  filter::ALL_SENTINEL,
  result::Cell,
  store::DimensionOptions,
};

use crate::materialize::cell_from_ref;

/// Every distinct value of `dimension`, in the order SQLite returns them.
///
/// NULLs are skipped; numbers are rendered as text.
pub fn load_distinct(conn: &Connection, dimension: Dimension) -> rusqlite::Result<Vec<String>> {
  let sql = format!("SELECT DISTINCT {} FROM {LOSS_TABLE}", dimension.column());
  let mut stmt = conn.prepare(&sql)?;
  let cells = stmt
    .query_map([], |row| row.get_ref(0).map(cell_from_ref))?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  Ok(cells.into_iter().filter_map(cell_text).collect())
}

/// [`load_distinct`] followed by the `"ALL"` sentinel.
pub fn load_dimension(conn: &Connection, dimension: Dimension) -> rusqlite::Result<Vec<String>> {
  let mut values = load_distinct(conn, dimension)?;
  values.push(ALL_SENTINEL.to_owned());
  Ok(values)
}

/// Load every option list. Dates carry no sentinel: a snapshot date is always
/// an explicit choice.
pub fn load_options(conn: &Connection) -> rusqlite::Result<DimensionOptions> {
  Ok(DimensionOptions {
    dates:        load_distinct(conn, Dimension::Date)?,
    belligerents: load_dimension(conn, Dimension::Belligerent)?,
    categories:   load_dimension(conn, Dimension::Category)?,
    types:        load_dimension(conn, Dimension::Type)?,
    loss_types:   load_dimension(conn, Dimension::LossType)?,
  })
}

fn cell_text(cell: Cell) -> Option<String> {
  match cell {
    Cell::Null => None,
    Cell::Integer(i) => Some(i.to_string()),
    Cell::Real(f) => Some(f.to_string()),
    Cell::Text(s) => Some(s),
    Cell::Blob(b) => Some(String::from_utf8_lossy(&b).into_owned()),
  }
}
