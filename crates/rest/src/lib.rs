//! # fleet-rest - HTTP API for the Fleet record server
//!
//! A thin REST facade over [`fleet_search`]: it saves and fetches person
//! records, searches vehicle records, and reports backend health. All
//! storage and query construction lives in the core crate; this crate only
//! maps HTTP to service calls and store errors to status codes.
//!
//! ## API Endpoints
//!
//! | Operation | HTTP Method | URL Pattern |
//! |-----------|-------------|-------------|
//! | save person | POST | `/api/person` |
//! | fetch person | GET | `/api/person/{id}` |
//! | save vehicle | POST | `/api/vehicle` |
//! | fetch vehicle | GET | `/api/vehicle/{id}` |
//! | search vehicles | POST | `/api/vehicle/search` |
//! | vehicles created since | GET | `/api/vehicle/created-since/{timestamp}` |
//! | health | GET | `/health` |
//!
//! ## Error Handling
//!
//! Errors render as a JSON problem body with an appropriate status code:
//! 400 for malformed requests, 404 for missing records, 502 when the search
//! backend fails, 503 when it is unhealthy.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fleet_rest::{ServerConfig, create_app_with_config};
//! use fleet_search::backend::elasticsearch::{ElasticsearchBackend, ElasticsearchConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = Arc::new(ElasticsearchBackend::new(ElasticsearchConfig::default())?);
//!     let config = ServerConfig::default();
//!     let app = create_app_with_config(backend, config.clone());
//!
//!     let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use fleet_search::backend::DocumentBackend;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<B>(backend: Arc<B>) -> Router
where
    B: DocumentBackend + Send + Sync + 'static,
{
    create_app_with_config(backend, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// Sets up all routes, tracing, timeout, and (optionally) CORS middleware.
pub fn create_app_with_config<B>(backend: Arc<B>, config: ServerConfig) -> Router
where
    B: DocumentBackend + Send + Sync + 'static,
{
    info!(backend = backend.backend_name(), "Creating HTTP API server");

    // Create application state
    let state = AppState::new(backend, config.clone());

    // Build the router with all routes
    let router = routing::create_routes(state);

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    // Add CORS if enabled
    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    // Apply remaining middleware
    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fleet={},tower_http=debug", level)));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
