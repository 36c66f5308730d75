//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use wartracker_core::{ErrorKind, store::StoreError};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("database unavailable: {0}")]
  Unavailable(#[source] BoxError),

  /// The engine rejected caller-supplied SQL; the message is passed through.
  #[error("{0}")]
  Query(#[source] BoxError),

  #[error("{0}")]
  DataShape(#[source] BoxError),

  #[error("store error: {0}")]
  Store(#[source] BoxError),
}

impl ApiError {
  /// Map a failure of a template-built query. An engine error here means the
  /// template itself is wrong, so it is reported as an internal error.
  pub fn from_store<E: StoreError>(err: E) -> Self {
    match err.kind() {
      ErrorKind::Connection => ApiError::Unavailable(Box::new(err)),
      ErrorKind::DataShape => ApiError::DataShape(Box::new(err)),
      ErrorKind::Query => ApiError::Store(Box::new(err)),
    }
  }

  /// Map a failure of SQL the caller wrote themselves.
  pub fn from_direct_sql<E: StoreError>(err: E) -> Self {
    match err.kind() {
      ErrorKind::Query => ApiError::Query(Box::new(err)),
      _ => ApiError::from_store(err),
    }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::BadRequest(_) | ApiError::Query(_) => StatusCode::BAD_REQUEST,
      ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
      ApiError::DataShape(_) => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    } else {
      tracing::debug!(error = %self, "request rejected");
    }
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug, Error)]
  #[error("fake {0:?}")]
  struct Fake(ErrorKind);

  impl StoreError for Fake {
    fn kind(&self) -> ErrorKind { self.0 }
  }

  #[test]
  fn template_failures_map_by_kind() {
    assert_eq!(
      ApiError::from_store(Fake(ErrorKind::Connection)).status(),
      StatusCode::SERVICE_UNAVAILABLE
    );
    assert_eq!(
      ApiError::from_store(Fake(ErrorKind::DataShape)).status(),
      StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(
      ApiError::from_store(Fake(ErrorKind::Query)).status(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn direct_sql_engine_errors_are_the_callers() {
    let err = ApiError::from_direct_sql(Fake(ErrorKind::Query));
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(err.to_string(), "fake Query");
    assert_eq!(
      ApiError::from_direct_sql(Fake(ErrorKind::Connection)).status(),
      StatusCode::SERVICE_UNAVAILABLE
    );
  }
}
