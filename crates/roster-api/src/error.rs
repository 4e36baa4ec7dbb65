//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<roster_core::Error> for ApiError {
  fn from(e: roster_core::Error) -> Self {
    use roster_core::Error;
    match e {
      Error::EmployeeNotFound(id) => {
        ApiError::NotFound(format!("employee {id} not found"))
      }
      // A missing department on an employee write is a referential conflict
      // on the payload, not a 404 on the addressed resource.
      Error::DepartmentNotFound(id) => {
        ApiError::Conflict(format!("department {id} does not exist"))
      }
      Error::DuplicateDepartmentName(name) => {
        ApiError::Conflict(format!("department name {name:?} is already taken"))
      }
      Error::DuplicateEmail(email) => {
        ApiError::Conflict(format!("email {email:?} is already registered"))
      }
      Error::Store(source) => ApiError::Store(source),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
