//! Handlers for `/options` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/options` | Cached option lists |
//! | `POST` | `/options/reload` | Re-read every list from the database |

use std::sync::Arc;

use axum::{Json, extract::State};
use wartracker_core::store::{DimensionOptions, ReportSource};

use crate::error::ApiError;

/// `GET /options`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<DimensionOptions>, ApiError>
where
  S: ReportSource,
{
  let options = store.options().await.map_err(ApiError::from_store)?;
  Ok(Json(options))
}

/// `POST /options/reload`
pub async fn reload<S>(State(store): State<Arc<S>>) -> Result<Json<DimensionOptions>, ApiError>
where
  S: ReportSource,
{
  let options = store.reload_options().await.map_err(ApiError::from_store)?;
  tracing::info!(dates = options.dates.len(), "reloaded dimension options");
  Ok(Json(options))
}
