//! SQL templates for the preset report and the day-over-day comparison.
//!
//! Both builders are pure: they return SQL text and never touch a database.

use serde::{Deserialize, Serialize};

use crate::{
  dimension::{Dimension, GroupBy, LOSS_TABLE},
  filter::{FilterSelection, build_where_suffix, quote_literal},
};

/// Alias of the metric column in the preset report.
pub const COUNT_LABEL: &str = "Count";

/// Label of the column appended by the comparison merger.
pub const CHANGE_LABEL: &str = "Change";

// ─── Preset report ───────────────────────────────────────────────────────────

/// The grouped count over all five dimensions, restricted by `filters`.
///
/// `WHERE 1=1` lets the filter suffix be appended unconditionally.
pub fn preset_query(filters: &FilterSelection) -> String {
  let select: Vec<String> = Dimension::ALL
    .iter()
    .map(|d| format!("{} AS \"{}\"", d.column(), d.label()))
    .collect();
  let group_by: Vec<&str> = Dimension::ALL.iter().map(|d| d.column()).collect();

  format!(
    "SELECT {}, count(proof_id) AS \"{COUNT_LABEL}\" FROM {LOSS_TABLE} WHERE 1=1{} GROUP BY {}",
    select.join(", "),
    filters.where_suffix(),
    group_by.join(", "),
  )
}

// ─── Day-over-day ────────────────────────────────────────────────────────────

/// Dimensions fixed by the comparison itself rather than by detail filters.
const PINNED: [Dimension; 2] = [Dimension::Date, Dimension::Belligerent];

/// A comparison of one belligerent's counts, grouped by one dimension, across
/// two snapshot dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOverDay {
  pub group_by:    GroupBy,
  pub belligerent: String,
  /// Detail filters, applied identically to both dates. Entries for the date
  /// or belligerent are ignored; those come from the request itself.
  #[serde(default)]
  pub filters:     FilterSelection,
}

impl DayOverDay {
  pub fn new(group_by: GroupBy, belligerent: impl Into<String>) -> Self {
    Self { group_by, belligerent: belligerent.into(), filters: FilterSelection::new() }
  }

  pub fn with_filters(mut self, filters: FilterSelection) -> Self {
    self.filters = filters;
    self
  }

  /// The grouping dimensions, in `SELECT`/`GROUP BY` order.
  pub fn dimensions(&self) -> Vec<Dimension> { vec![self.group_by.dimension()] }

  /// Date or belligerent entries in `filters` that would restrict the query.
  ///
  /// [`query_for`](Self::query_for) skips them, so a caller can reject a
  /// request that sets any.
  pub fn pinned_filters(&self) -> Vec<Dimension> {
    self
      .filters
      .iter()
      .filter(|(d, f)| PINNED.contains(d) && f.is_restricted())
      .map(|(d, _)| d)
      .collect()
  }

  /// Labels of the non-metric columns produced by [`query_for`](Self::query_for).
  ///
  /// The merger joins on exactly this list.
  pub fn join_columns(&self) -> Vec<String> {
    self.dimensions().iter().map(|d| d.label().to_owned()).collect()
  }

  /// Counts for a single snapshot date. The metric column is aliased to
  /// `date`, so merged tables show which date each count belongs to.
  pub fn query_for(&self, date: &str) -> String {
    let dimensions = self.dimensions();
    let select: Vec<String> = dimensions
      .iter()
      .map(|d| format!("{} AS \"{}\"", d.column(), d.label()))
      .collect();
    let group_by: Vec<&str> = dimensions.iter().map(|d| d.column()).collect();
    let details = build_where_suffix(
      self.filters.iter().filter(|(d, _)| !PINNED.contains(d)).map(|(d, f)| (d.column(), f)),
    );

    format!(
      "SELECT {}, count(proof_id) AS \"{}\" FROM {LOSS_TABLE} WHERE {} = {} AND {} = {}{} GROUP BY {}",
      select.join(", "),
      date.replace('"', "\"\""),
      Dimension::Date.column(),
      quote_literal(date),
      Dimension::Belligerent.column(),
      quote_literal(&self.belligerent),
      details,
      group_by.join(", "),
    )
  }
}
