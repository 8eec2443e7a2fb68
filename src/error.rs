use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use thiserror::Error;

use crate::models::ErrorResponse;

/// Every way a ledger request can fail. Each variant maps to one HTTP status.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Storage(#[from] DbErr),

    #[error("Forbidden: Invalid or missing token")]
    Auth,
}

impl LedgerError {
    pub fn status(&self) -> StatusCode {
        match self {
            LedgerError::NotFound(_) => StatusCode::NOT_FOUND,
            LedgerError::Validation(_) => StatusCode::BAD_REQUEST,
            LedgerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LedgerError::Auth => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let LedgerError::Storage(ref e) = self {
            tracing::error!(error = %e, "Storage failure");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
