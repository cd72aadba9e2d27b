// service/src/errors.rs

use actix_web::error::JsonPayloadError;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use shopcart::{StoreError, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("{0}")]
  Validation(#[from] ValidationError),

  #[error("Bad Request: {0}")]
  BadRequest(String),

  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  Conflict(String),

  #[error("Unsupported Media Type: {0}")]
  UnsupportedMediaType(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Store Error: {0}")]
  Store(StoreError),
}

impl From<StoreError> for AppError {
  fn from(err: StoreError) -> Self {
    match err {
      StoreError::ShopcartExists { .. } => AppError::Conflict(err.to_string()),
      StoreError::ShopcartNotFound { .. } | StoreError::ProductNotFound { .. } => AppError::NotFound(err.to_string()),
      StoreError::Backend { .. } => AppError::Store(err),
    }
  }
}

impl From<JsonPayloadError> for AppError {
  fn from(err: JsonPayloadError) -> Self {
    match err {
      JsonPayloadError::ContentType => {
        AppError::UnsupportedMediaType("Content-Type must be application/json".to_string())
      }
      other => AppError::BadRequest(other.to_string()),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Conflict(_) => StatusCode::CONFLICT,
      AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    if status.is_server_error() {
      tracing::error!(application_error = %self, "Responding with error");
    } else {
      tracing::info!(application_error = %self, status = status.as_u16(), "Responding with error");
    }
    match self {
      AppError::Validation(e) => HttpResponse::build(status).json(json!({"error": e.to_string(), "fields": e.fields})),
      AppError::BadRequest(m) | AppError::NotFound(m) | AppError::Conflict(m) | AppError::UnsupportedMediaType(m) => {
        HttpResponse::build(status).json(json!({"error": m}))
      }
      AppError::Config(m) => HttpResponse::build(status).json(json!({"error": "Configuration issue", "detail": m})),
      AppError::Sqlx(_) | AppError::Store(_) => {
        HttpResponse::build(status).json(json!({"error": "Database operation failed"}))
      }
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
