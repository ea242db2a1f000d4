//! Error types for the storage core.
//!
//! Errors are grouped by the phase that produced them: building a query,
//! talking to the backend, or (de)serializing a record. [`StoreError`] is the
//! umbrella returned by the service layer so callers can match on the phase.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for record store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Query construction errors
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Backend communication errors
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Record encoding/decoding errors
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Errors raised while building a search query.
///
/// A query that fails to build is never sent to the backend.
#[derive(Error, Debug)]
pub enum BuildError {
    /// The index name was empty.
    #[error("index name is empty")]
    EmptyIndexName,

    /// The logical index is not one the store knows about.
    #[error("unknown index: {name}")]
    UnknownIndex { name: String },

    /// A filter criterion cannot be turned into a query clause.
    #[error("invalid criterion on field '{field}': {message}")]
    InvalidCriterion { field: String, message: String },
}

/// Errors raised while communicating with the search backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The client transport could not be constructed.
    #[error("connection failed: {message}")]
    ConnectionFailed { message: String },

    /// The request did not complete (network failure, timeout).
    #[error("request to {backend_name} failed: {message}")]
    Request {
        backend_name: &'static str,
        message: String,
    },

    /// The backend answered with a non-success status.
    #[error("{backend_name} returned status {status}: {body}")]
    Status {
        backend_name: &'static str,
        status: u16,
        body: String,
    },

    /// The backend answered with a payload the client could not parse.
    #[error("malformed response from {backend_name}: {message}")]
    MalformedResponse {
        backend_name: &'static str,
        message: String,
    },

    /// The backend is unreachable or unhealthy.
    #[error("{backend_name} unavailable: {message}")]
    Unavailable {
        backend_name: &'static str,
        message: String,
    },
}

/// Errors raised while encoding or decoding a record.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The record could not be serialized to JSON.
    #[error("failed to encode record: {0}")]
    Encode(#[source] serde_json::Error),

    /// The stored payload could not be deserialized into the record type.
    #[error("failed to decode record: {0}")]
    Decode(#[source] serde_json::Error),
}

/// A specialized Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_error_displays_index_name() {
        let err = BuildError::UnknownIndex {
            name: "spaceship".to_string(),
        };
        assert_eq!(err.to_string(), "unknown index: spaceship");
    }

    #[test]
    fn store_error_wraps_transparently() {
        let err: StoreError = BuildError::EmptyIndexName.into();
        assert_eq!(err.to_string(), "index name is empty");
        assert!(matches!(err, StoreError::Build(_)));
    }

    #[test]
    fn backend_status_error_carries_detail() {
        let err = BackendError::Status {
            backend_name: "elasticsearch",
            status: 503,
            body: "shard unavailable".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("503"));
        assert!(rendered.contains("shard unavailable"));
    }
}
