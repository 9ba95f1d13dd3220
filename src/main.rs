// src/main.rs

use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use codewarden::api::http::create_router;
use codewarden::config::CONFIG;
use codewarden::state::AppState;
use codewarden::utils::mask_secret;

/// Graceful shutdown signal handler for SIGTERM and Ctrl+C
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting codewarden");
    info!("Slack bot token: {}", mask_secret(&CONFIG.slack.bot_token));
    info!(
        "Gemini model: {} (key {})",
        CONFIG.gemini.model,
        mask_secret(&CONFIG.gemini.api_key)
    );
    info!(
        "Giveaway cadence: first round at attempt {}, interval {} (+{} per win)",
        CONFIG.giveaway.initial_threshold,
        CONFIG.giveaway.base_interval,
        CONFIG.giveaway.interval_increment
    );

    // An empty usable pool is a configuration bug, not something to limp
    // through with made-up codes
    CONFIG.validate()?;
    info!(
        "Discount code pool: {} configured, {} deprecated",
        CONFIG.codes.configured.len(),
        CONFIG.codes.deprecated.len()
    );

    let app_state = Arc::new(AppState::new());
    let app = create_router(app_state);

    let bind_address = CONFIG.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("Slack events endpoint: http://{}/slack/events", bind_address);
    info!("Health endpoint: /health");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");

    Ok(())
}
