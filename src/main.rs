use std::sync::Arc;

use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod error;
mod gemini;
mod script;
mod tts;

use api::routes::{create_router, AppState};
use config::Config;
use gemini::GeminiClient;
use tts::GoogleTranslateTts;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Configuration from environment
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    let addr = match config.socket_addr() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Creator relay v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Starting server on http://{}", addr);
    tracing::info!(
        "Model: {}, upstream timeout: {}s",
        config.model,
        config.upstream_timeout.as_secs()
    );

    // Create provider clients
    let generator = GeminiClient::new(
        config.api_key.clone(),
        config.model.clone(),
        &config.gemini_base_url,
        config.upstream_timeout,
    )
    .expect("Failed to create Gemini client");
    let synthesizer = GoogleTranslateTts::new(&config.tts_base_url, config.upstream_timeout)
        .expect("Failed to create TTS client");

    // Create app state
    let state = Arc::new(AppState {
        generator: Arc::new(generator),
        synthesizer: Arc::new(synthesizer),
    });

    // Create router
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
