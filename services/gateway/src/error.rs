use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ledger::LedgerError;
use serde_json::json;
use thiserror::Error;

/// Central error type for the API application
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, code) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, "BAD_REQUEST"),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "NOT_FOUND"),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg, "CONFLICT"),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
                "INTERNAL_ERROR",
            ),
        };

        let body = Json(json!({
            "error": code,
            "message": error_message
        }));

        (status, body).into_response()
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::EmployeeNotFound { .. } | LedgerError::PlacementNotFound { .. } => {
                AppError::NotFound(err.to_string())
            }
            LedgerError::DuplicateEmail { .. } => AppError::Conflict(err.to_string()),
            LedgerError::Structure(_) | LedgerError::Commission(_) => {
                AppError::BadRequest(err.to_string())
            }
        }
    }
}
