use std::sync::Arc;

use axum::Router;
use cartwheel_agent::ChatAssistant;
use cartwheel_core::config::{AppConfig, ConfigError};
use cartwheel_core::InMemoryCatalog;
use chrono::Duration;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::gemini::GeminiClient;
use crate::{catalog, chat, health};

pub struct Application {
    pub config: AppConfig,
    pub router: Router,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("http client construction failed: {0}")]
    HttpClient(#[source] anyhow::Error),
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(event_name = "system.bootstrap.start", "starting application bootstrap");

    let client = GeminiClient::from_config(&config.llm).map_err(BootstrapError::HttpClient)?;
    let assistant = ChatAssistant::with_rate_limit(
        client,
        config.chat.rate_limit_max_requests,
        Duration::seconds(config.chat.rate_limit_window_secs),
    );

    let router = Router::new()
        .merge(chat::router(assistant))
        .merge(catalog::router(Arc::new(InMemoryCatalog::with_seed_data())))
        .merge(health::router(config.llm.api_key.is_some()))
        // The storefront is served from a different origin in development.
        .layer(CorsLayer::permissive());

    info!(
        event_name = "system.bootstrap.router_assembled",
        llm_model = %config.llm.model,
        llm_configured = config.llm.api_key.is_some(),
        "routes assembled"
    );

    Ok(Application { config, router })
}
