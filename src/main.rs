//! SocrAI service binary entry point.
//!
//! Starts the HTTP server with an in-memory session store and an
//! OpenAI-compatible chat client. All logs go to stderr.

use std::sync::Arc;

use tower_http::trace::TraceLayer;

use socrai::config::Config;
use socrai::dialogue::DialogueEngine;
use socrai::model::{ClientConfig, OpenAiClient};
use socrai::server::router;
use socrai::store::MemoryStore;

#[tokio::main]
async fn main() {
    // Initialize logging to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "info".to_string())
                .parse()
                .unwrap_or_else(|_| tracing_subscriber::filter::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("socrai starting...");

    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Configuration loaded: bind={}, model={}, timeout={}ms",
        config.bind_addr,
        config.model,
        config.request_timeout_ms
    );

    let client_config = ClientConfig::new()
        .with_base_url(config.api_base_url.clone())
        .with_model(config.model.clone())
        .with_timeout_ms(config.request_timeout_ms)
        .with_max_retries(config.max_retries);

    let client = match OpenAiClient::new(client_config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Client error: {e}");
            std::process::exit(1);
        }
    };

    let engine = DialogueEngine::new(Arc::new(MemoryStore::new()), Arc::new(client));
    let app = router(engine).layer(TraceLayer::new_for_http());

    let listener = match tokio::net::TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {e}", config.bind_addr);
            std::process::exit(1);
        }
    };

    tracing::info!("socrai listening on {}", config.bind_addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }

    tracing::info!("socrai shutdown complete");
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("Failed to install ctrl-c handler");
    }
}
