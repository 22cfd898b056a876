//! Survey Error Types
//!
//! Survey-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type SurveyResult<T> = Result<T, SurveyError>;

#[derive(Debug, Error)]
pub enum SurveyError {
    /// Session absent: never issued, already redeemed, or swept
    #[error("Session not found")]
    SessionNotFound,

    /// Session existed but its TTL had elapsed when it was redeemed
    #[error("Session expired")]
    SessionExpired,

    #[error("Wrong number of answers: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Invalid answer label: {0}")]
    InvalidLabel(i64),

    /// Every freshly drawn session id was already taken
    #[error("Could not allocate a session id after {attempts} attempts")]
    CollisionExhausted { attempts: u32 },

    #[error("Invalid city boundary: {0}")]
    InvalidBoundary(String),

    #[error("Invalid sampling plan: {0}")]
    InvalidSamplingPlan(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SurveyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SurveyError::SessionNotFound => StatusCode::NOT_FOUND,
            SurveyError::SessionExpired => StatusCode::GONE,
            SurveyError::LengthMismatch { .. } | SurveyError::InvalidLabel(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            SurveyError::CollisionExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            SurveyError::InvalidBoundary(_)
            | SurveyError::InvalidSamplingPlan(_)
            | SurveyError::Database(_)
            | SurveyError::Serialization(_)
            | SurveyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SurveyError::SessionNotFound => ErrorKind::NotFound,
            SurveyError::SessionExpired => ErrorKind::Gone,
            SurveyError::LengthMismatch { .. } | SurveyError::InvalidLabel(_) => {
                ErrorKind::UnprocessableEntity
            }
            SurveyError::CollisionExhausted { .. } => ErrorKind::ServiceUnavailable,
            SurveyError::InvalidBoundary(_)
            | SurveyError::InvalidSamplingPlan(_)
            | SurveyError::Database(_)
            | SurveyError::Serialization(_)
            | SurveyError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    fn log(&self) {
        match self {
            SurveyError::Database(e) => {
                tracing::error!(error = %e, "Survey database error");
            }
            SurveyError::Serialization(e) => {
                tracing::error!(error = %e, "Survey serialization error");
            }
            SurveyError::Internal(msg)
            | SurveyError::InvalidBoundary(msg)
            | SurveyError::InvalidSamplingPlan(msg) => {
                tracing::error!(message = %msg, "Survey internal error");
            }
            SurveyError::CollisionExhausted { attempts } => {
                tracing::warn!(attempts = *attempts, "Session id space exhausted");
            }
            _ => {
                tracing::debug!(error = %self, "Survey request rejected");
            }
        }
    }
}

impl From<SurveyError> for AppError {
    fn from(err: SurveyError) -> Self {
        let kind = err.kind();
        let app_err = match &err {
            // Don't leak storage details to clients
            SurveyError::Database(_) | SurveyError::Serialization(_) | SurveyError::Internal(_) => {
                AppError::new(kind, "Internal error")
            }
            SurveyError::SessionNotFound | SurveyError::SessionExpired => {
                AppError::new(kind, err.to_string()).with_action("Request a new session")
            }
            _ => AppError::new(kind, err.to_string()),
        };
        app_err.with_source(err)
    }
}

impl IntoResponse for SurveyError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
