//! The record service.
//!
//! Orchestrates the query builder, codec, and backend for one record type.
//! Constructed with an injected backend handle and codec instance; holds no
//! mutable state of its own.
//!
//! Each operation comes in two flavors. The `try_*` methods return explicit
//! error unions so callers can tell "not found" from "backend failure" from
//! "malformed data". The plain methods keep the legacy facade contract:
//! every failure is logged and degraded to `false`, `None`, or an empty vec,
//! and nothing is ever raised past the service boundary.

use std::marker::PhantomData;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::backend::DocumentBackend;
use crate::codec::DocumentCodec;
use crate::document::{Document, Person, Vehicle};
use crate::error::StoreResult;
use crate::filter::SearchRequest;
use crate::query::{CREATED_FIELD, QueryBuilder, SearchQuery};

/// Service for storing, fetching, and searching records of one type.
pub struct RecordService<D, B> {
    backend: Arc<B>,
    codec: DocumentCodec,
    _record: PhantomData<fn() -> D>,
}

/// Service over person records.
pub type PersonService<B> = RecordService<Person, B>;

/// Service over vehicle records.
pub type VehicleService<B> = RecordService<Vehicle, B>;

impl<D, B> Clone for RecordService<D, B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            codec: self.codec,
            _record: PhantomData,
        }
    }
}

impl<D, B> std::fmt::Debug for RecordService<D, B>
where
    B: DocumentBackend,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordService")
            .field("backend", &self.backend.backend_name())
            .finish_non_exhaustive()
    }
}

impl<D, B> RecordService<D, B>
where
    D: Document,
    B: DocumentBackend,
{
    /// Creates a service over the given backend and codec.
    pub fn new(backend: Arc<B>, codec: DocumentCodec) -> Self {
        Self {
            backend,
            codec,
            _record: PhantomData,
        }
    }

    /// Returns the backend this service talks to.
    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    // ------------------------------------------------------------------
    // Strict operations
    // ------------------------------------------------------------------

    /// Indexes (upserts) a record under its id.
    pub async fn try_index(&self, record: &D) -> StoreResult<()> {
        let document = self.codec.to_value(record)?;
        self.backend
            .index_document(D::index(), record.id(), document)
            .await?;
        Ok(())
    }

    /// Fetches a record by id; `Ok(None)` when it does not exist.
    pub async fn try_get_by_id(&self, id: &str) -> StoreResult<Option<D>> {
        let source = self.backend.get_document(D::index(), id).await?;
        match source {
            Some(source) => Ok(Some(self.codec.from_value(&source)?)),
            None => Ok(None),
        }
    }

    /// Searches with a filter request.
    pub async fn try_search(&self, request: &SearchRequest) -> StoreResult<Vec<D>> {
        let query = QueryBuilder::new(D::index())?.build(request)?;
        self.run_search(query).await
    }

    /// Fetches all records created strictly after `since`.
    pub async fn try_search_created_since(&self, since: DateTime<Utc>) -> StoreResult<Vec<D>> {
        let query = QueryBuilder::new(D::index())?.build_created_since(CREATED_FIELD, since)?;
        self.run_search(query).await
    }

    /// Searches with a filter request, restricted to records created after `since`.
    pub async fn try_search_filtered_since(
        &self,
        request: &SearchRequest,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<D>> {
        let query = QueryBuilder::new(D::index())?.build_filtered_since(request, since)?;
        self.run_search(query).await
    }

    /// Dispatches a built query and decodes the hits.
    ///
    /// A hit that fails to decode is skipped with a warning; one bad document
    /// never aborts the whole search.
    async fn run_search(&self, query: SearchQuery) -> StoreResult<Vec<D>> {
        let hits = self.backend.search(&query).await?;

        let mut records = Vec::with_capacity(hits.len());
        for hit in &hits {
            match self.codec.from_value::<D>(hit) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(
                        index = D::index(),
                        error = %e,
                        "Skipping hit that failed to decode"
                    );
                }
            }
        }
        Ok(records)
    }

    // ------------------------------------------------------------------
    // Lenient operations (legacy facade contract)
    // ------------------------------------------------------------------

    /// Indexes a record, reporting only success or failure.
    ///
    /// Failures are logged, not retried.
    pub async fn index(&self, record: &D) -> bool {
        match self.try_index(record).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(index = D::index(), id = record.id(), error = %e, "Index failed");
                false
            }
        }
    }

    /// Fetches a record by id; `None` when absent or on any failure.
    pub async fn get_by_id(&self, id: &str) -> Option<D> {
        match self.try_get_by_id(id).await {
            Ok(found) => found,
            Err(e) => {
                tracing::error!(index = D::index(), id, error = %e, "Get by id failed");
                None
            }
        }
    }

    /// Searches with a filter request; empty on any failure.
    pub async fn search(&self, request: &SearchRequest) -> Vec<D> {
        self.degrade(self.try_search(request).await)
    }

    /// Fetches all records created strictly after `since`; empty on any failure.
    pub async fn search_created_since(&self, since: DateTime<Utc>) -> Vec<D> {
        self.degrade(self.try_search_created_since(since).await)
    }

    /// Combined filter + cursor search; empty on any failure.
    pub async fn search_filtered_since(
        &self,
        request: &SearchRequest,
        since: DateTime<Utc>,
    ) -> Vec<D> {
        self.degrade(self.try_search_filtered_since(request, since).await)
    }

    /// Collapses a search failure to an empty result, logging the cause.
    fn degrade(&self, result: StoreResult<Vec<D>>) -> Vec<D> {
        match result {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(index = D::index(), error = %e, "Search failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BackendError, StoreError};
    use crate::filter::FilterCriterion;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use serde_json::{Value, json};
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// In-memory backend that interprets the query bodies the builder emits:
    /// `match_all`, `term`, and `range{gt|gte|lt|lte}`.
    #[derive(Default)]
    struct MockBackend {
        documents: Mutex<BTreeMap<(String, String), Value>>,
        fail_requests: bool,
    }

    impl MockBackend {
        fn failing() -> Self {
            Self {
                fail_requests: true,
                ..Default::default()
            }
        }

        fn put(&self, index: &str, id: &str, doc: Value) {
            self.documents
                .lock()
                .unwrap()
                .insert((index.to_string(), id.to_string()), doc);
        }

        fn matches(clause: &Value, doc: &Value) -> bool {
            if let Some(term) = clause.get("term").and_then(|t| t.as_object()) {
                return term
                    .iter()
                    .all(|(field, expected)| doc.get(field) == Some(expected));
            }
            if let Some(range) = clause.get("range").and_then(|r| r.as_object()) {
                return range.iter().all(|(field, bounds)| {
                    let actual = doc
                        .get(field)
                        .and_then(|v| v.as_str())
                        .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok());
                    let actual = match actual {
                        Some(ts) => ts,
                        None => return false,
                    };
                    bounds.as_object().map_or(false, |bounds| {
                        bounds.iter().all(|(op, bound)| {
                            let bound = bound
                                .as_str()
                                .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok());
                            let bound = match bound {
                                Some(ts) => ts,
                                None => return false,
                            };
                            match op.as_str() {
                                "gt" => actual > bound,
                                "gte" => actual >= bound,
                                "lt" => actual < bound,
                                "lte" => actual <= bound,
                                _ => false,
                            }
                        })
                    })
                });
            }
            false
        }
    }

    #[async_trait]
    impl DocumentBackend for MockBackend {
        fn backend_name(&self) -> &'static str {
            "mock"
        }

        async fn index_document(
            &self,
            index: &str,
            id: &str,
            document: Value,
        ) -> Result<(), BackendError> {
            if self.fail_requests {
                return Err(BackendError::Status {
                    backend_name: "mock",
                    status: 503,
                    body: "unavailable".to_string(),
                });
            }
            self.put(index, id, document);
            Ok(())
        }

        async fn get_document(
            &self,
            index: &str,
            id: &str,
        ) -> Result<Option<Value>, BackendError> {
            if self.fail_requests {
                return Err(BackendError::Request {
                    backend_name: "mock",
                    message: "connection refused".to_string(),
                });
            }
            Ok(self
                .documents
                .lock()
                .unwrap()
                .get(&(index.to_string(), id.to_string()))
                .cloned())
        }

        async fn search(&self, query: &SearchQuery) -> Result<Vec<Value>, BackendError> {
            if self.fail_requests {
                return Err(BackendError::Request {
                    backend_name: "mock",
                    message: "connection refused".to_string(),
                });
            }
            let documents = self.documents.lock().unwrap();
            let candidates = documents
                .iter()
                .filter(|((index, _), _)| *index == query.index)
                .map(|(_, doc)| doc);

            if query.body["query"].get("match_all").is_some() {
                return Ok(candidates.cloned().collect());
            }

            let must = query.body["query"]["bool"]["must"]
                .as_array()
                .cloned()
                .unwrap_or_default();
            Ok(candidates
                .filter(|doc| must.iter().all(|clause| Self::matches(clause, doc)))
                .cloned()
                .collect())
        }

        async fn health_check(&self) -> Result<(), BackendError> {
            Ok(())
        }
    }

    fn vehicle_service(backend: MockBackend) -> (Arc<MockBackend>, VehicleService<MockBackend>) {
        let backend = Arc::new(backend);
        let service = VehicleService::new(Arc::clone(&backend), DocumentCodec);
        (backend, service)
    }

    fn toyota(id: &str, year: i32) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            make: Some("Toyota".to_string()),
            model: Some("Corolla".to_string()),
            number: None,
            created: Some(Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap()),
            extra: Default::default(),
        }
    }

    #[tokio::test]
    async fn index_then_get_by_id_round_trips() {
        let (_, service) = vehicle_service(MockBackend::default());
        let vehicle = toyota("v1", 2024);

        assert!(service.index(&vehicle).await);
        let found = service.get_by_id("v1").await;
        assert_eq!(found, Some(vehicle));
    }

    #[tokio::test]
    async fn get_by_id_on_nonexistent_id_is_none_not_an_error() {
        let (_, service) = vehicle_service(MockBackend::default());
        assert_eq!(service.try_get_by_id("ghost").await.unwrap(), None);
        assert_eq!(service.get_by_id("ghost").await, None);
    }

    #[tokio::test]
    async fn backend_failure_degrades_to_false_and_none() {
        let (_, service) = vehicle_service(MockBackend::failing());
        let vehicle = toyota("v1", 2024);

        assert!(!service.index(&vehicle).await);
        assert_eq!(service.get_by_id("v1").await, None);
        assert!(service.search(&SearchRequest::default()).await.is_empty());
    }

    #[tokio::test]
    async fn strict_path_surfaces_backend_errors() {
        let (_, service) = vehicle_service(MockBackend::failing());
        let err = service.try_get_by_id("v1").await.unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[tokio::test]
    async fn empty_request_matches_all_records() {
        let (_, service) = vehicle_service(MockBackend::default());
        service.index(&toyota("v1", 2023)).await;
        service.index(&toyota("v2", 2024)).await;

        let all = service.try_search(&SearchRequest::default()).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn criteria_filter_records() {
        let (_, service) = vehicle_service(MockBackend::default());
        service.index(&toyota("v1", 2024)).await;
        let mut honda = toyota("v2", 2024);
        honda.make = Some("Honda".to_string());
        service.index(&honda).await;

        let request = SearchRequest::new().with_criterion(FilterCriterion::eq("make", "Toyota"));
        let found = service.try_search(&request).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "v1");
    }

    #[tokio::test]
    async fn created_since_includes_newer_and_excludes_older() {
        let (_, service) = vehicle_service(MockBackend::default());
        service.index(&toyota("v1", 2024)).await;

        let since_2023 = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let since_2025 = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        let newer = service.search_created_since(since_2023).await;
        assert_eq!(newer.iter().map(|v| v.id.as_str()).collect::<Vec<_>>(), ["v1"]);

        let older = service.search_created_since(since_2025).await;
        assert!(older.is_empty());
    }

    #[tokio::test]
    async fn created_since_bound_is_exclusive() {
        let (_, service) = vehicle_service(MockBackend::default());
        service.index(&toyota("v1", 2024)).await;

        let exactly_created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(service.search_created_since(exactly_created).await.is_empty());
    }

    #[tokio::test]
    async fn filtered_since_combines_both_restrictions() {
        let (_, service) = vehicle_service(MockBackend::default());
        service.index(&toyota("v1", 2024)).await;
        let mut honda = toyota("v2", 2024);
        honda.make = Some("Honda".to_string());
        service.index(&honda).await;

        let request = SearchRequest::new().with_criterion(FilterCriterion::eq("make", "Toyota"));
        let since = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();

        let found = service.try_search_filtered_since(&request, since).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "v1");

        let since = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let found = service.try_search_filtered_since(&request, since).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn undecodable_hit_is_skipped_not_fatal() {
        let (backend, service) = vehicle_service(MockBackend::default());
        service.index(&toyota("v1", 2024)).await;
        // A document whose id has the wrong type cannot decode into Vehicle
        backend.put("vehicle", "bad", json!({ "id": 17, "make": "Mystery" }));

        let found = service.try_search(&SearchRequest::default()).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "v1");
    }

    #[tokio::test]
    async fn undecodable_single_fetch_degrades_to_none() {
        let (backend, service) = vehicle_service(MockBackend::default());
        backend.put("vehicle", "bad", json!({ "id": 17 }));

        assert_eq!(service.get_by_id("bad").await, None);
        assert!(matches!(
            service.try_get_by_id("bad").await.unwrap_err(),
            StoreError::Codec(_)
        ));
    }

    #[tokio::test]
    async fn person_service_uses_person_index() {
        let backend = Arc::new(MockBackend::default());
        let persons = PersonService::new(Arc::clone(&backend), DocumentCodec);

        let person = Person {
            id: "p1".to_string(),
            name: Some("Amartya".to_string()),
            created: None,
            extra: Default::default(),
        };
        assert!(persons.index(&person).await);
        assert!(backend
            .documents
            .lock()
            .unwrap()
            .contains_key(&("person".to_string(), "p1".to_string())));
    }

    #[tokio::test]
    async fn failed_index_then_get_returns_none() {
        // Backend rejects the write, so a later read must not see the record
        let (_, failing) = vehicle_service(MockBackend::failing());
        assert!(!failing.index(&toyota("v9", 2024)).await);

        let (_, empty) = vehicle_service(MockBackend::default());
        assert_eq!(empty.get_by_id("v9").await, None);
    }
}
