//! Handler for `POST /query/sql`.
//!
//! The body's SQL is executed verbatim against the read-only database. Engine
//! errors come back as `400` with SQLite's own message.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde::Deserialize;
use wartracker_core::{result::QueryResult, store::ReportSource};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SqlBody {
  pub sql: String,
}

/// `POST /query/sql` — body: `{"sql":"SELECT ..."}`
pub async fn run<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<SqlBody>,
) -> Result<Json<QueryResult>, ApiError>
where
  S: ReportSource,
{
  let result = store.run_sql(&body.sql).await.map_err(ApiError::from_direct_sql)?;
  Ok(Json(result))
}
