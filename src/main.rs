use anyhow::Result;
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use line_translate_bridge::build_app;
use line_translate_bridge::config::Config;
use line_translate_bridge::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("line_translate_bridge=debug,tower_http=debug")),
        )
        .init();

    let config_path = std::env::var("CONFIG_PATH").ok();
    let config = Config::load(config_path.as_deref())?;
    info!(
        "Loaded configuration: target language {} ({})",
        config.target_language.name, config.target_language.code
    );

    if config.line.channel_secret.is_empty() {
        warn!("LINE_CHANNEL_SECRET is not set; every delivery will be rejected with 401");
    }
    if config.line.channel_access_token.is_empty() {
        warn!("LINE_CHANNEL_ACCESS_TOKEN is not set; replies will be rejected");
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app_state = AppState::new(config)?;
    let app = build_app(app_state);

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
