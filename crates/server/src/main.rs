mod bootstrap;
mod catalog;
mod chat;
mod gemini;
mod health;

use anyhow::Result;
use cartwheel_core::config::{AppConfig, LoadOptions};

fn init_logging(config: &AppConfig) {
    use cartwheel_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    // Load config and initialize logging before any other operations
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let app = bootstrap::bootstrap_with_config(config)?;

    let address = format!("{}:{}", app.config.server.bind_address, app.config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    let grace_secs = app.config.server.graceful_shutdown_secs;

    tracing::info!(
        event_name = "system.server.started",
        bind_address = %address,
        "cartwheel-server listening"
    );

    let server = axum::serve(listener, app.router).with_graceful_shutdown(shutdown_signal());

    // Drain is bounded: a connection holding the server open past the grace
    // period does not block process exit.
    tokio::select! {
        result = server => result?,
        _ = shutdown_deadline(grace_secs) => {
            tracing::warn!(
                event_name = "system.server.drain_timeout",
                grace_secs,
                "graceful shutdown deadline reached; exiting"
            );
        }
    }

    tracing::info!(event_name = "system.server.stopped", "cartwheel-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        return;
    }
    tracing::info!(
        event_name = "system.server.stopping",
        "shutdown signal received; draining connections"
    );
}

async fn shutdown_deadline(grace_secs: u64) {
    let _ = tokio::signal::ctrl_c().await;
    tokio::time::sleep(std::time::Duration::from_secs(grace_secs)).await;
}
