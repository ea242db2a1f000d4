//! Error types for the HTTP API.
//!
//! Store errors are mapped to HTTP statuses so clients can tell "not found"
//! from "bad request" from "backend down":
//!
//! | Store error | HTTP status |
//! |-------------|-------------|
//! | `BuildError` | 400 |
//! | `CodecError` | 500 |
//! | `BackendError` | 502 |
//!
//! Every error renders as a JSON problem body `{ "error", "message" }`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fleet_search::StoreError;
use serde_json::json;
use thiserror::Error;

/// The primary error type for HTTP API operations.
#[derive(Error, Debug)]
pub enum RestError {
    /// Record not found (HTTP 404).
    #[error("record not found: {index}/{id}")]
    NotFound {
        /// The logical index (e.g. "person").
        index: String,
        /// The record id.
        id: String,
    },

    /// Invalid request (HTTP 400).
    #[error("bad request: {message}")]
    BadRequest {
        /// Error message.
        message: String,
    },

    /// The search backend failed or is unreachable (HTTP 502).
    #[error("backend error: {message}")]
    BadGateway {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// The HTTP status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            RestError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// A stable machine-readable error code for the JSON body.
    fn error_code(&self) -> &'static str {
        match self {
            RestError::NotFound { .. } => "not-found",
            RestError::BadRequest { .. } => "bad-request",
            RestError::BadGateway { .. } => "backend-error",
            RestError::Internal { .. } => "internal",
        }
    }
}

impl From<StoreError> for RestError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Build(e) => RestError::BadRequest {
                message: e.to_string(),
            },
            StoreError::Backend(e) => RestError::BadGateway {
                message: e.to_string(),
            },
            StoreError::Codec(e) => RestError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({
            "error": self.error_code(),
            "message": self.to_string(),
        });

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
        }

        (status, Json(body)).into_response()
    }
}

/// A specialized Result type for HTTP handlers.
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_search::{BackendError, BuildError};

    #[test]
    fn build_errors_map_to_400() {
        let err: RestError = StoreError::Build(BuildError::EmptyIndexName).into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn backend_errors_map_to_502() {
        let err: RestError = StoreError::Backend(BackendError::Request {
            backend_name: "elasticsearch",
            message: "timed out".to_string(),
        })
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = RestError::NotFound {
            index: "person".to_string(),
            id: "p1".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "record not found: person/p1");
    }
}
