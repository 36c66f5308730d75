//! [`SqliteReports`]: the SQLite implementation of [`ReportSource`].

use std::{path::PathBuf, sync::Arc};

use tokio::sync::RwLock;
use wartracker_core::{
  compare::merge_comparison,
  filter::FilterSelection,
  query::{DayOverDay, preset_query},
  result::QueryResult,
  store::{DimensionOptions, ReportSource},
};

use crate::{DbConn, Result, materialize::materialize, options::load_options};

/// Reports over a read-only War Tracker database.
///
/// Cloning is cheap: clones share the connection factory and the options
/// cache.
#[derive(Clone)]
pub struct SqliteReports {
  db:      Arc<DbConn>,
  options: Arc<RwLock<Option<DimensionOptions>>>,
}

impl SqliteReports {
  /// Wrap an existing factory. Options are loaded on first use.
  pub fn new(db: Arc<DbConn>) -> Self { Self { db, options: Arc::new(RwLock::new(None)) } }

  /// Open the database at `path` and load the option lists, failing early if
  /// the file cannot be read.
  pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
    let reports = Self::new(Arc::new(DbConn::new(path)));
    reports.reload_options().await?;
    Ok(reports)
  }

  pub fn db(&self) -> &DbConn { &self.db }

  async fn query(&self, sql: String) -> Result<QueryResult> {
    tracing::info!(%sql, "running query");
    self.db.scoped(move |conn| materialize(conn, &sql)).await
  }
}

// ─── ReportSource impl ───────────────────────────────────────────────────────

impl ReportSource for SqliteReports {
  type Error = crate::Error;

  async fn options(&self) -> Result<DimensionOptions> {
    if let Some(cached) = self.options.read().await.as_ref() {
      return Ok(cached.clone());
    }
    self.reload_options().await
  }

  async fn reload_options(&self) -> Result<DimensionOptions> {
    let loaded = self.db.scoped(load_options).await?;
    tracing::debug!(
      dates = loaded.dates.len(),
      categories = loaded.categories.len(),
      types = loaded.types.len(),
      "loaded dimension options"
    );
    *self.options.write().await = Some(loaded.clone());
    Ok(loaded)
  }

  async fn preset(&self, filters: &FilterSelection) -> Result<QueryResult> {
    tracing::debug!(?filters, "building preset query");
    self.query(preset_query(filters)).await
  }

  async fn day_over_day(
    &self,
    request: &DayOverDay,
    date_1: &str,
    date_2: &str,
  ) -> Result<QueryResult> {
    let sql_1 = request.query_for(date_1);
    let sql_2 = request.query_for(date_2);
    tracing::info!(%sql_1, %sql_2, "running day-over-day queries");

    // One read transaction, so both dates see the same snapshot.
    let (day_1, day_2) = self
      .db
      .scoped(move |conn| {
        conn.execute_batch("BEGIN")?;
        Ok((materialize(conn, &sql_1)?, materialize(conn, &sql_2)?))
      })
      .await?;

    Ok(merge_comparison(&day_1, &day_2, &request.join_columns())?)
  }

  async fn run_sql(&self, sql: &str) -> Result<QueryResult> {
    tracing::info!(sql, "received direct query");
    let sql = sql.to_owned();
    self.db.scoped(move |conn| materialize(conn, &sql)).await
  }
}
