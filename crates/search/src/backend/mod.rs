//! Backend abstraction and implementations.
//!
//! A [`DocumentBackend`] is the externally-owned search engine the store
//! borrows per call: upsert-by-id, get-by-id, and query-based search over
//! raw JSON documents. The service layer owns typing and error degradation;
//! backends only move documents.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::BackendError;
use crate::query::SearchQuery;

pub mod elasticsearch;

pub use elasticsearch::{ElasticsearchAuth, ElasticsearchBackend, ElasticsearchConfig};

/// A document-oriented search engine.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// A short name identifying the backend, used in logs and health output.
    fn backend_name(&self) -> &'static str;

    /// Indexes (upserts) a document under `id` in the logical `index`.
    ///
    /// Succeeds iff the backend acknowledges with a success status.
    async fn index_document(
        &self,
        index: &str,
        id: &str,
        document: Value,
    ) -> Result<(), BackendError>;

    /// Fetches the raw document stored under `id`, or `None` when absent.
    ///
    /// Absence is not an error; only communication failures are.
    async fn get_document(&self, index: &str, id: &str) -> Result<Option<Value>, BackendError>;

    /// Runs a search and returns hit payloads in backend-provided order.
    ///
    /// A logical index with no physical counterpart yet yields an empty list.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Value>, BackendError>;

    /// Verifies the backend is reachable and serving.
    async fn health_check(&self) -> Result<(), BackendError>;
}
