//! # fleet-search - Document storage and search core
//!
//! This crate is the storage core of the Fleet record server. It stores typed
//! JSON records (persons, vehicles) in a document-oriented search engine and
//! turns generic filter requests into backend queries.
//!
//! ## Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`document`] - Record types and the [`Document`] trait
//! - [`index`] - Logical index registry
//! - [`codec`] - JSON encoding/decoding of records
//! - [`filter`] - The generic filter DTO ([`SearchRequest`])
//! - [`query`] - The request builder ([`QueryBuilder`])
//! - [`backend`] - The [`DocumentBackend`] trait and the Elasticsearch
//!   implementation
//! - [`service`] - The [`RecordService`] orchestrating builder, codec, and
//!   backend
//! - [`error`] - Error types
//!
//! ## Error philosophy
//!
//! Every fallible operation returns an explicit error union so callers can
//! distinguish "not found" from "backend failure" from "malformed data".
//! The [`RecordService`] additionally offers lenient variants that degrade
//! every failure to a negative result (`false` / `None` / empty vec) plus a
//! log entry, which is the contract the HTTP facade's predecessors exposed.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fleet_search::backend::elasticsearch::{ElasticsearchBackend, ElasticsearchConfig};
//! use fleet_search::codec::DocumentCodec;
//! use fleet_search::document::Vehicle;
//! use fleet_search::service::VehicleService;
//!
//! let backend = Arc::new(ElasticsearchBackend::new(ElasticsearchConfig::default())?);
//! let vehicles = VehicleService::new(backend, DocumentCodec::default());
//!
//! let found = vehicles.try_get_by_id("v1").await?;
//! ```

pub mod backend;
pub mod codec;
pub mod document;
pub mod error;
pub mod filter;
pub mod index;
pub mod query;
pub mod service;

pub use backend::DocumentBackend;
pub use codec::DocumentCodec;
pub use document::{Document, Person, Vehicle};
pub use error::{BackendError, BuildError, CodecError, StoreError, StoreResult};
pub use filter::{FilterCriterion, FilterOp, SearchRequest, SortOrder};
pub use query::{QueryBuilder, SearchQuery};
pub use service::{PersonService, RecordService, VehicleService};
