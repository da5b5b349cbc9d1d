//! API error type and its HTTP mapping.
//!
//! Every failure leaves the server as `{"error": "<message>"}` with a status
//! reflecting the failure class. Storage causes are never sent to callers.

use axum::{
    Json,
    extract::rejection::{BytesRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use poker_tracker::TournamentError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Tournament(#[from] TournamentError),

    /// Body could not be read, was malformed JSON, or did not fit the payload shape
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Path segment was not an integer id
    #[error("invalid tournament id: {0}")]
    InvalidId(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Tournament(TournamentError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Tournament(TournamentError::Database(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Tournament(_) | ApiError::InvalidBody(_) | ApiError::InvalidId(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    pub fn client_message(&self) -> String {
        match self {
            ApiError::Tournament(e) => e.client_message(),
            ApiError::InvalidBody(_) => "Invalid request body".to_string(),
            ApiError::InvalidId(_) => "Invalid tournament id".to_string(),
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidId(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.client_message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ApiError::from(TournamentError::InvalidSite(None)),
                StatusCode::BAD_REQUEST,
                "Invalid poker site",
            ),
            (
                ApiError::from(TournamentError::MissingFields(vec!["name"])),
                StatusCode::BAD_REQUEST,
                "Missing required fields",
            ),
            (
                ApiError::from(TournamentError::NotFound(1)),
                StatusCode::NOT_FOUND,
                "Tournament not found",
            ),
            (
                ApiError::from(TournamentError::Database(sqlx_pool_timeout())),
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error",
            ),
            (
                ApiError::InvalidId("abc".to_string()),
                StatusCode::BAD_REQUEST,
                "Invalid tournament id",
            ),
        ];

        for (err, status, message) in cases {
            assert_eq!(err.status_code(), status);
            assert_eq!(err.client_message(), message);
        }
    }

    fn sqlx_pool_timeout() -> poker_tracker::db::StorageError {
        poker_tracker::db::StorageError::PoolTimedOut
    }
}
