//! The `ReportSource` trait and the option lists it serves.
//!
//! The trait is implemented by storage backends (e.g.
//! `wartracker-store-sqlite`). The HTTP layer depends on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{ErrorKind, filter::FilterSelection, query::DayOverDay, result::QueryResult};

/// Selectable values for every dimension.
///
/// All lists except `dates` end with the `"ALL"` sentinel. Order otherwise
/// follows whatever order the database returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionOptions {
  pub dates:        Vec<String>,
  pub belligerents: Vec<String>,
  pub categories:   Vec<String>,
  pub types:        Vec<String>,
  pub loss_types:   Vec<String>,
}

/// A backend error that can say which broad class of failure it is.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn kind(&self) -> ErrorKind;
}

/// Read-only access to loss reports.
///
/// Every call acquires and releases its own database scope; nothing is held
/// open between calls.
pub trait ReportSource: Send + Sync {
  type Error: StoreError;

  /// The option lists cached at start-up or at the last reload.
  fn options(&self) -> impl Future<Output = Result<DimensionOptions, Self::Error>> + Send + '_;

  /// Re-read every option list from the database and replace the cache.
  fn reload_options(
    &self,
  ) -> impl Future<Output = Result<DimensionOptions, Self::Error>> + Send + '_;

  /// Run the grouped preset report for `filters`.
  fn preset<'a>(
    &'a self,
    filters: &'a FilterSelection,
  ) -> impl Future<Output = Result<QueryResult, Self::Error>> + Send + 'a;

  /// Run `request` for both dates and merge the two tables.
  ///
  /// Positive `Change` values mean `date_1` has the higher count.
  fn day_over_day<'a>(
    &'a self,
    request: &'a DayOverDay,
    date_1: &'a str,
    date_2: &'a str,
  ) -> impl Future<Output = Result<QueryResult, Self::Error>> + Send + 'a;

  /// Execute caller-supplied SQL verbatim. Only the first statement runs.
  fn run_sql<'a>(
    &'a self,
    sql: &'a str,
  ) -> impl Future<Output = Result<QueryResult, Self::Error>> + Send + 'a;
}
