use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Domain and transport failures, each mapped to exactly one HTTP status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(Vec<String>),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    DuplicateEmail(String),
    #[error("An unexpected error occurred: {0}")]
    Database(#[from] sqlx::Error),
    #[error("An unexpected error occurred: {0}")]
    Internal(String),
}

/// Uniform error envelope returned to clients. `errors` carries the
/// aggregated `"field: message"` list for validation failures only.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub status: u16,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateEmail(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            log::error!("{self}");
        }

        let errors = match self {
            AppError::Validation(violations) => Some(violations.clone()),
            _ => None,
        };

        HttpResponse::build(status).json(ErrorResponse {
            message: self.to_string(),
            status: status.as_u16(),
            timestamp: Utc::now(),
            errors,
        })
    }
}
