//! Handlers for the preset report endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/query/preset` | Body: [`PresetBody`] |
//! | `POST` | `/query/day-over-day` | Body: [`DayOverDayBody`]; returns the merged table |

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::NaiveDate;
use serde::Deserialize;
use wartracker_core::{
  filter::FilterSelection, query::DayOverDay, result::QueryResult, store::ReportSource,
};

use crate::error::ApiError;

/// Snapshot dates are stored as ISO calendar dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── Preset ──────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /query/preset`.
///
/// `filters` maps raw column names to selected values, e.g.
/// `{"as_of":["2025-04-01"],"party":["ALL"]}`. Missing columns are
/// unrestricted.
#[derive(Debug, Deserialize)]
pub struct PresetBody {
  #[serde(default)]
  pub filters: FilterSelection,
}

/// `POST /query/preset`
pub async fn preset<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<PresetBody>,
) -> Result<Json<QueryResult>, ApiError>
where
  S: ReportSource,
{
  let result = store.preset(&body.filters).await.map_err(ApiError::from_store)?;
  Ok(Json(result))
}

// ─── Day-over-day ────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /query/day-over-day`.
#[derive(Debug, Deserialize)]
pub struct DayOverDayBody {
  #[serde(flatten)]
  pub request: DayOverDay,
  pub date_1:  String,
  pub date_2:  String,
}

/// `POST /query/day-over-day`
///
/// Positive `Change` values mean `date_1` has the higher count.
pub async fn day_over_day<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<DayOverDayBody>,
) -> Result<Json<QueryResult>, ApiError>
where
  S: ReportSource,
{
  validate_date(&body.date_1)?;
  validate_date(&body.date_2)?;
  if body.request.belligerent.trim().is_empty() {
    return Err(ApiError::BadRequest("belligerent must not be empty".to_owned()));
  }
  let pinned = body.request.pinned_filters();
  if !pinned.is_empty() {
    let columns: Vec<&str> = pinned.iter().map(|d| d.column()).collect();
    return Err(ApiError::BadRequest(format!(
      "filters may not restrict {}; use date_1, date_2 and belligerent",
      columns.join(", ")
    )));
  }

  let merged = store
    .day_over_day(&body.request, &body.date_1, &body.date_2)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(merged))
}

fn validate_date(date: &str) -> Result<(), ApiError> {
  NaiveDate::parse_from_str(date, DATE_FORMAT)
    .map(|_| ())
    .map_err(|e| ApiError::BadRequest(format!("invalid date {date:?}: {e}")))
}
