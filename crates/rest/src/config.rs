//! Server configuration.
//!
//! Supports both programmatic configuration and environment variable
//! overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FLEET_SERVER_PORT` | 8080 | Server port |
//! | `FLEET_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `FLEET_LOG_LEVEL` | info | Log level |
//! | `FLEET_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `FLEET_ENABLE_CORS` | true | Enable CORS |
//! | `FLEET_CORS_ORIGINS` | * | Allowed origins |
//! | `FLEET_BASE_URL` | http://localhost:8080 | Server base URL |
//! | `FLEET_ELASTICSEARCH_NODES` | http://localhost:9200 | ES node URLs (comma-separated) |
//! | `FLEET_ELASTICSEARCH_INDEX_PREFIX` | fleet | Physical index prefix |
//! | `FLEET_ELASTICSEARCH_USERNAME` | — | Basic auth username |
//! | `FLEET_ELASTICSEARCH_PASSWORD` | — | Basic auth password |

use clap::Parser;

/// Server configuration for the Fleet HTTP API.
///
/// Construct from command line arguments with [`ServerConfig::parse`], from
/// the environment with [`ServerConfig::from_env`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "fleet")]
#[command(about = "Fleet record server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "FLEET_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "FLEET_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "FLEET_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "FLEET_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "FLEET_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "FLEET_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Base URL for the server (used in Location headers).
    #[arg(long, env = "FLEET_BASE_URL", default_value = "http://localhost:8080")]
    pub base_url: String,

    /// Elasticsearch node URLs (comma-separated).
    #[arg(
        long,
        env = "FLEET_ELASTICSEARCH_NODES",
        default_value = "http://localhost:9200"
    )]
    pub elasticsearch_nodes: String,

    /// Physical index name prefix in Elasticsearch.
    #[arg(long, env = "FLEET_ELASTICSEARCH_INDEX_PREFIX", default_value = "fleet")]
    pub elasticsearch_index_prefix: String,

    /// Elasticsearch basic auth username.
    #[arg(long, env = "FLEET_ELASTICSEARCH_USERNAME")]
    pub elasticsearch_username: Option<String>,

    /// Elasticsearch basic auth password.
    #[arg(long, env = "FLEET_ELASTICSEARCH_PASSWORD")]
    pub elasticsearch_password: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            base_url: "http://localhost:8080".to_string(),
            elasticsearch_nodes: "http://localhost:9200".to_string(),
            elasticsearch_index_prefix: "fleet".to_string(),
            elasticsearch_username: None,
            elasticsearch_password: None,
        }
    }
}

impl ServerConfig {
    /// Creates a configuration from environment variables, falling back to
    /// defaults when parsing fails.
    pub fn from_env() -> Self {
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the Elasticsearch node URLs as a list.
    pub fn elasticsearch_node_list(&self) -> Vec<String> {
        self.elasticsearch_nodes
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.elasticsearch_node_list().is_empty() {
            errors.push("At least one Elasticsearch node is required".to_string());
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Creates a configuration suitable for testing.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            request_timeout: 5, // Shorter timeout for tests
            enable_cors: false,
            cors_origins: "*".to_string(),
            base_url: "http://localhost:0".to_string(),
            elasticsearch_nodes: "http://localhost:9200".to_string(),
            elasticsearch_index_prefix: "fleet-test".to_string(),
            elasticsearch_username: None,
            elasticsearch_password: None,
        }
    }
}
