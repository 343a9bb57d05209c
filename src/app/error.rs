//! Request error taxonomy and its HTTP rendering.

use axum::{
  http::{header, HeaderValue, StatusCode},
  response::{IntoResponse, Response},
  Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Error 404: Not found.")]
  NotFound,
  #[error("Error 405: Method not allowed.")]
  MethodNotAllowed,
  #[error("Error 401: Unauthorized.")]
  Unauthorized,
  #[error("{0}")]
  BadRequest(String),
  #[error("Error: Invalid data. Check log data format.")]
  InvalidData,
  #[error("{0}")]
  Configuration(String),
  #[error("Error 500: Database Error")]
  Storage(#[from] sqlx::Error),
}

impl AppError {
  pub fn bad_request(msg: impl Into<String>) -> Self {
    Self::BadRequest(msg.into())
  }

  pub fn configuration(msg: impl Into<String>) -> Self {
    Self::Configuration(msg.into())
  }

  pub fn status(&self) -> StatusCode {
    match self {
      AppError::NotFound => StatusCode::NOT_FOUND,
      AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
      AppError::Unauthorized => StatusCode::UNAUTHORIZED,
      AppError::BadRequest(_) | AppError::InvalidData => StatusCode::BAD_REQUEST,
      AppError::Configuration(_) | AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn log(&self) {
    match self {
      AppError::Storage(e) => error!("storage error: {e}"),
      AppError::Configuration(msg) => error!("configuration error: {msg}"),
      _ => {}
    }
  }
}

/// Plain-text rendering used on the web path.
impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    self.log();
    let mut res = (self.status(), self.to_string()).into_response();
    res.headers_mut().insert(
      header::CONTENT_TYPE,
      HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    res
  }
}

/// JSON rendering of [`AppError`] used on the API path.
#[derive(Debug)]
pub struct ApiError(pub AppError);

#[derive(Serialize)]
struct ErrBody {
  error: String,
}

impl<E: Into<AppError>> From<E> for ApiError {
  fn from(e: E) -> Self {
    ApiError(e.into())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    self.0.log();
    let body = ErrBody {
      error: self.0.to_string(),
    };
    (self.0.status(), Json(body)).into_response()
  }
}
