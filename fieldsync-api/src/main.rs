//! # FieldSync API
//!
//! HTTP backend for the FieldSync field-data collection app: registration
//! and login, offline form sync, PDF uploads with data extraction, a
//! dashboard summary and a Gemini-backed chat proxy.
//!
//! ## Startup sequence
//!
//! 1. Initialize tracing
//! 2. Load configuration from environment (`.env` honored in development)
//! 3. Create database pool and run pending migrations
//! 4. Build the router and serve until ctrl-c
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p fieldsync-api
//! ```

use fieldsync_api::{
    app::{build_router, AppState},
    config::Config,
};
use fieldsync_shared::db::{migrations, pool};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fieldsync_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("FieldSync API v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::from_env()?;

    // Initialize database pool
    let db_config = pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    };
    let db = pool::create_pool(db_config).await?;

    // Run pending migrations
    migrations::run_migrations(&db).await?;

    // Build application state and router
    let state = AppState::new(db, config);
    let addr = state.config.bind_address();
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves when the process receives ctrl-c
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        return;
    }
    tracing::info!("Shutdown signal received, draining...");
}
