//! Fleet record server
//!
//! Serves person and vehicle records over an Elasticsearch search backend.

use std::sync::Arc;

use clap::Parser;
use fleet_rest::{ServerConfig, create_app_with_config, init_logging};
use fleet_search::backend::elasticsearch::{
    ElasticsearchAuth, ElasticsearchBackend, ElasticsearchConfig,
};
use tracing::info;

/// Creates the Elasticsearch backend from the server configuration.
fn create_elasticsearch_backend(config: &ServerConfig) -> anyhow::Result<ElasticsearchBackend> {
    let nodes = config.elasticsearch_node_list();

    let auth = match (
        &config.elasticsearch_username,
        &config.elasticsearch_password,
    ) {
        (Some(username), Some(password)) => Some(ElasticsearchAuth::Basic {
            username: username.clone(),
            password: password.clone(),
        }),
        _ => None,
    };

    let backend_config = ElasticsearchConfig {
        nodes: nodes.clone(),
        index_prefix: config.elasticsearch_index_prefix.clone(),
        request_timeout_ms: config.request_timeout * 1000,
        auth,
        ..Default::default()
    };

    info!(
        nodes = ?nodes,
        index_prefix = %config.elasticsearch_index_prefix,
        "Initializing Elasticsearch backend"
    );

    Ok(ElasticsearchBackend::new(backend_config)?)
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        "Starting Fleet record server"
    );

    let backend = Arc::new(create_elasticsearch_backend(&config)?);
    let app = create_app_with_config(backend, config.clone());
    serve(app, &config).await
}
