//! Day-over-day merging of two single-date result tables.

use std::collections::BTreeMap;

use crate::{
  Error, Result,
  query::CHANGE_LABEL,
  result::{Cell, QueryResult},
};

/// Full outer join of `left` and `right` on `join_columns`.
///
/// Each table must consist of exactly `join_columns` followed by one integer
/// metric column. A key missing on one side counts as zero there. The output
/// holds the join columns, both metric columns (keeping their original names)
/// and a `Change` column equal to `left - right`, ordered by join key.
pub fn merge_comparison(
  left: &QueryResult,
  right: &QueryResult,
  join_columns: &[String],
) -> Result<QueryResult> {
  let left_metric = metric_column(left, join_columns, "left")?;
  let right_metric = metric_column(right, join_columns, "right")?;

  let mut merged: BTreeMap<Vec<Cell>, (i64, i64)> = BTreeMap::new();
  for (key, count) in keyed_counts(left, join_columns.len())? {
    let total = &mut merged.entry(key).or_default().0;
    *total = total.checked_add(count).ok_or_else(|| overflow("left metric"))?;
  }
  for (key, count) in keyed_counts(right, join_columns.len())? {
    let total = &mut merged.entry(key).or_default().1;
    *total = total.checked_add(count).ok_or_else(|| overflow("right metric"))?;
  }

  let mut columns = join_columns.to_vec();
  columns.extend([left_metric, right_metric, CHANGE_LABEL.to_owned()]);

  let rows = merged
    .into_iter()
    .map(|(mut key, (l, r))| {
      let change = l.checked_sub(r).ok_or_else(|| overflow(CHANGE_LABEL))?;
      key.extend([Cell::Integer(l), Cell::Integer(r), Cell::Integer(change)]);
      Ok(key)
    })
    .collect::<Result<Vec<_>>>()?;

  Ok(QueryResult::new(columns, rows))
}

/// Check `table`'s shape and return the name of its metric column.
fn metric_column(table: &QueryResult, join_columns: &[String], side: &str) -> Result<String> {
  match table.columns.split_last() {
    Some((metric, keys)) if keys == join_columns => Ok(metric.clone()),
    _ => Err(Error::DataShape(format!(
      "{side} table has columns {:?}, expected {:?} plus one metric column",
      table.columns, join_columns
    ))),
  }
}

fn overflow(what: &str) -> Error {
  Error::DataShape(format!("{what} overflows a 64-bit integer"))
}

fn keyed_counts(table: &QueryResult, key_len: usize) -> Result<Vec<(Vec<Cell>, i64)>> {
  let mut out = Vec::with_capacity(table.rows.len());
  for row in &table.rows {
    if row.len() != key_len + 1 {
      return Err(Error::DataShape(format!(
        "row has {} cells, expected {}",
        row.len(),
        key_len + 1
      )));
    }
    let count = match &row[key_len] {
      Cell::Integer(i) => *i,
      Cell::Null => 0,
      other => {
        return Err(Error::DataShape(format!("metric value {other:?} is not an integer")));
      }
    };
    out.push((row[..key_len].to_vec(), count));
  }
  Ok(out)
}
