//! Application state for the HTTP API.
//!
//! Holds the record services and configuration shared by all handlers. The
//! services are constructed once at startup with their backend handle and
//! codec; nothing here is a process-wide singleton.

use std::sync::Arc;

use fleet_search::backend::DocumentBackend;
use fleet_search::codec::DocumentCodec;
use fleet_search::service::{PersonService, VehicleService};

use crate::config::ServerConfig;

/// Shared application state for the HTTP API.
///
/// # Type Parameters
///
/// * `B` - The search backend type (must implement [`DocumentBackend`])
pub struct AppState<B> {
    /// The backend shared by the services.
    backend: Arc<B>,

    /// Service over person records.
    persons: PersonService<B>,

    /// Service over vehicle records.
    vehicles: VehicleService<B>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// Manually implement Clone since B is behind an Arc and doesn't need to be Clone
impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            persons: self.persons.clone(),
            vehicles: self.vehicles.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<B: DocumentBackend> AppState<B> {
    /// Creates the state, wiring both services to the given backend.
    pub fn new(backend: Arc<B>, config: ServerConfig) -> Self {
        let codec = DocumentCodec;
        Self {
            persons: PersonService::new(Arc::clone(&backend), codec),
            vehicles: VehicleService::new(Arc::clone(&backend), codec),
            backend,
            config: Arc::new(config),
        }
    }

    /// Returns the backend shared by the services.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the person service.
    pub fn persons(&self) -> &PersonService<B> {
        &self.persons
    }

    /// Returns the vehicle service.
    pub fn vehicles(&self) -> &VehicleService<B> {
        &self.vehicles
    }

    /// Returns the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the base URL for the server.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fleet_search::error::BackendError;
    use fleet_search::query::SearchQuery;
    use serde_json::Value;

    // Mock backend for testing
    struct MockBackend;

    #[async_trait]
    impl DocumentBackend for MockBackend {
        fn backend_name(&self) -> &'static str {
            "mock"
        }

        async fn index_document(
            &self,
            _index: &str,
            _id: &str,
            _document: Value,
        ) -> Result<(), BackendError> {
            unimplemented!()
        }

        async fn get_document(
            &self,
            _index: &str,
            _id: &str,
        ) -> Result<Option<Value>, BackendError> {
            unimplemented!()
        }

        async fn search(&self, _query: &SearchQuery) -> Result<Vec<Value>, BackendError> {
            unimplemented!()
        }

        async fn health_check(&self) -> Result<(), BackendError> {
            Ok(())
        }
    }

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new(Arc::new(MockBackend), ServerConfig::default());
        assert_eq!(state.backend().backend_name(), "mock");
        assert_eq!(state.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_app_state_clone_shares_backend() {
        let state = AppState::new(Arc::new(MockBackend), ServerConfig::for_testing());
        let cloned = state.clone();
        assert_eq!(state.base_url(), cloned.base_url());
    }
}
