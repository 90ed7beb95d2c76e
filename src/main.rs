mod admin;
mod api;
mod error;
mod estate;
mod notification;
mod pending;
mod routes;
mod state;

use anyhow::Context;
use api::MarketplaceClient;
use notification::{NotificationSession, NotificationSource};
use routes::create_router;
use state::{AppState, Config};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,estate_admin=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env()?);

    tracing::info!("Using marketplace API at {}", config.marketplace_api_url);
    if config.admin_api_token.is_none() {
        tracing::warn!("ADMIN_API_TOKEN is not set; marketplace requests will be unauthenticated");
    }

    let client = MarketplaceClient::new(
        config.marketplace_api_url.clone(),
        config.admin_api_token.clone(),
    );
    let source: Arc<dyn NotificationSource> = Arc::new(client.clone());

    // Start both notification pollers for this session
    let session = NotificationSession::start(source.clone(), config.poll_interval);

    let state = AppState::new(
        config.clone(),
        client,
        source,
        session.store().clone(),
        session.counter().clone(),
    );

    // Create router
    let app = create_router(state);

    let addr = config.bind_addr();
    tracing::info!("Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    session.shutdown().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
