//! Tabular query results.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A single value in a result row, mirroring SQLite's storage classes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
  Null,
  Integer(i64),
  Real(f64),
  Text(String),
  Blob(Vec<u8>),
}

impl Cell {
  pub fn as_str(&self) -> Option<&str> {
    match self {
      Cell::Text(s) => Some(s),
      _ => None,
    }
  }

  pub fn as_i64(&self) -> Option<i64> {
    match self {
      Cell::Integer(i) => Some(*i),
      _ => None,
    }
  }

  fn class_rank(&self) -> u8 {
    match self {
      Cell::Null => 0,
      Cell::Integer(_) | Cell::Real(_) => 1,
      Cell::Text(_) => 2,
      Cell::Blob(_) => 3,
    }
  }
}

impl From<&str> for Cell {
  fn from(s: &str) -> Self { Cell::Text(s.to_owned()) }
}

impl From<String> for Cell {
  fn from(s: String) -> Self { Cell::Text(s) }
}

impl From<i64> for Cell {
  fn from(i: i64) -> Self { Cell::Integer(i) }
}

// Ordering follows SQLite's cross-class rules: NULL, then numbers compared by
// value, then text, then blobs.
impl Ord for Cell {
  fn cmp(&self, other: &Self) -> Ordering {
    match (self, other) {
      (Cell::Integer(a), Cell::Integer(b)) => a.cmp(b),
      (Cell::Integer(a), Cell::Real(b)) => (*a as f64).total_cmp(b),
      (Cell::Real(a), Cell::Integer(b)) => a.total_cmp(&(*b as f64)),
      (Cell::Real(a), Cell::Real(b)) => a.total_cmp(b),
      (Cell::Text(a), Cell::Text(b)) => a.cmp(b),
      (Cell::Blob(a), Cell::Blob(b)) => a.cmp(b),
      _ => self.class_rank().cmp(&other.class_rank()),
    }
  }
}

impl PartialOrd for Cell {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl PartialEq for Cell {
  fn eq(&self, other: &Self) -> bool { self.cmp(other) == Ordering::Equal }
}

impl Eq for Cell {}

/// Column names and rows exactly as the engine produced them.
///
/// Column names are not deduplicated: two identically-aliased columns stay two
/// columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
  pub columns: Vec<String>,
  pub rows:    Vec<Vec<Cell>>,
}

impl QueryResult {
  pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self { Self { columns, rows } }

  /// `true` for statements that produced no result set at all.
  pub fn has_result_set(&self) -> bool { !self.columns.is_empty() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ordering_follows_storage_classes() {
    let mut cells = vec![
      Cell::Blob(vec![1]),
      Cell::from("IFVs"),
      Cell::Real(2.5),
      Cell::Null,
      Cell::Integer(2),
      Cell::from("APCs"),
    ];
    cells.sort();
    assert_eq!(
      cells,
      vec![
        Cell::Null,
        Cell::Integer(2),
        Cell::Real(2.5),
        Cell::from("APCs"),
        Cell::from("IFVs"),
        Cell::Blob(vec![1]),
      ]
    );
  }

  #[test]
  fn integer_and_real_compare_by_value() {
    assert_eq!(Cell::Integer(3), Cell::Real(3.0));
  }

  #[test]
  fn serialises_untagged() {
    let result = QueryResult::new(
      vec!["Equipment Category".into(), "Count".into()],
      vec![vec![Cell::from("Tanks"), Cell::Integer(5)], vec![Cell::Null, Cell::Real(0.5)]],
    );
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(
      json,
      serde_json::json!({
        "columns": ["Equipment Category", "Count"],
        "rows": [["Tanks", 5], [null, 0.5]],
      })
    );
  }
}
