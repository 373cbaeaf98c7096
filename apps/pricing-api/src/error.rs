//! # API Error Types
//!
//! Maps domain and storage failures onto HTTP responses.
//!
//! ## Response Mapping
//! ```text
//! ┌──────────────────────────────────────────┬────────┬────────────────────┐
//! │ Source                                   │ Status │ code               │
//! ├──────────────────────────────────────────┼────────┼────────────────────┤
//! │ PricingError::ArithmeticFault            │ 422    │ ARITHMETIC_FAULT   │
//! │ PricingError::StorageWriteFailure        │ 500    │ DATABASE_ERROR     │
//! │ DbError (analytics, monitor)             │ 500    │ DATABASE_ERROR     │
//! │ malformed JSON body / query string       │ 422    │ INVALID_REQUEST    │
//! └──────────────────────────────────────────┴────────┴────────────────────┘
//! ```
//!
//! Body: `{"code": "...", "message": "..."}`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use dynprice_core::PricingError;
use dynprice_db::DbError;

/// Errors a handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Calculation or history append failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// A read or write outside the engine failed.
    #[error(transparent)]
    Database(#[from] DbError),

    /// Request body did not deserialize.
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    /// Query string did not deserialize.
    #[error("Invalid query string: {0}")]
    InvalidQuery(#[from] QueryRejection),
}

/// Machine-readable error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ArithmeticFault,
    DatabaseError,
    InvalidRequest,
}

/// JSON error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    /// Status and code for this error.
    pub fn classify(&self) -> (StatusCode, ErrorCode) {
        match self {
            ApiError::Pricing(PricingError::ArithmeticFault { .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::ArithmeticFault)
            }
            ApiError::Pricing(PricingError::StorageWriteFailure(_)) | ApiError::Database(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseError)
            }
            ApiError::InvalidBody(_) | ApiError::InvalidQuery(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::InvalidRequest)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.classify();

        if status.is_server_error() {
            error!(error = %self, ?code, "Request failed");
        } else {
            warn!(error = %self, ?code, "Request rejected");
        }

        let body = ErrorBody {
            code,
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
