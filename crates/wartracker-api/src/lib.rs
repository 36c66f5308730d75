//! JSON query API for War Tracker.
//!
//! Exposes an axum [`Router`] backed by any
//! [`wartracker_core::store::ReportSource`]. TLS and transport concerns are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", wartracker_api::api_router(reports.clone()))
//! ```

pub mod error;
pub mod options;
pub mod reports;
pub mod sql;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use wartracker_core::store::ReportSource;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ReportSource + 'static,
{
  Router::new()
    // Option lists
    .route("/options", get(options::list::<S>))
    .route("/options/reload", post(options::reload::<S>))
    // Reports
    .route("/query/preset", post(reports::preset::<S>))
    .route("/query/day-over-day", post(reports::day_over_day::<S>))
    // Direct SQL
    .route("/query/sql", post(sql::run::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────
