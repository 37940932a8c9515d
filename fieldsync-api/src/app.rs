/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use fieldsync_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = fieldsync_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{
    config::Config,
    services::{AiClient, PdfExtractor, StubExtractor},
};
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use fieldsync_shared::auth::middleware::{jwt_auth_middleware, AuthError};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Gemini proxy client
    pub ai: AiClient,

    /// PDF data extractor
    pub extractor: Arc<dyn PdfExtractor>,
}

impl AppState {
    /// Creates new application state with the production extractor
    pub fn new(db: PgPool, config: Config) -> Self {
        let ai = AiClient::new(config.ai.api_key.clone());

        Self {
            db,
            config: Arc::new(config),
            ai,
            extractor: Arc::new(StubExtractor),
        }
    }

    /// Replaces the extractor
    ///
    /// Used by tests to substitute a failing double.
    pub fn with_extractor(mut self, extractor: Arc<dyn PdfExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// The router is organized as follows:
/// ```text
/// /
/// ├── /health                   # Health check (public)
/// ├── /api/
/// │   ├── /auth/                # Authentication endpoints (public)
/// │   │   ├── POST /register
/// │   │   └── POST /login
/// │   ├── /forms/sync           # POST, field_worker|admin
/// │   ├── /upload-pdf/          # POST multipart, admin
/// │   ├── /report/generate      # POST, any authenticated
/// │   ├── /dashboard/summary    # GET, admin|analyst
/// │   └── /chat/query           # POST, admin
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Authentication (everything under /api except /api/auth)
///
/// Role gates run inside the handlers; the middleware only authenticates.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public, no auth required)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    // Everything else requires a valid bearer token
    let protected_routes = Router::new()
        .nest(
            "/forms",
            Router::new().route("/sync", post(routes::forms::sync_forms)),
        )
        .route("/upload-pdf/", post(routes::uploads::upload_pdf))
        .nest(
            "/report",
            Router::new().route("/generate", post(routes::report::generate_report)),
        )
        .nest(
            "/dashboard",
            Router::new().route("/summary", get(routes::dashboard::dashboard_summary)),
        )
        .nest(
            "/chat",
            Router::new().route("/query", post(routes::chat::chat_query)),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Build complete /api surface
    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .merge(protected_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        // Production mode: configure allowed origins
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    // Combine all routes with middleware stack
    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// JWT authentication middleware layer
///
/// Pulls the secret out of state and delegates to the shared gateway,
/// which validates the bearer token and injects `AuthContext` into
/// request extensions.
async fn jwt_auth_layer(
    state: axum::extract::State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    jwt_auth_middleware(state.jwt_secret().to_string(), req, next).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AiConfig, ApiConfig, DatabaseConfig, JwtConfig, UploadConfig};
    use std::path::PathBuf;

    fn test_state() -> AppState {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
                cors_origins: vec!["http://localhost:3000".to_string()],
            },
            database: DatabaseConfig {
                url: "postgres://localhost/fieldsync_test".to_string(),
                max_connections: 2,
            },
            jwt: JwtConfig {
                secret: "test-secret-key-at-least-32-bytes-long".to_string(),
            },
            ai: AiConfig { api_key: None },
            uploads: UploadConfig {
                dir: PathBuf::from("uploaded_pdfs"),
            },
        };

        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy(&config.database.url)
            .unwrap();

        AppState::new(pool, config)
    }

    #[tokio::test]
    async fn test_build_router_constructs() {
        let _router = build_router(test_state());
    }

    #[tokio::test]
    async fn test_state_exposes_jwt_secret() {
        let state = test_state();
        assert_eq!(state.jwt_secret(), "test-secret-key-at-least-32-bytes-long");
    }

    #[tokio::test]
    async fn test_with_extractor_swaps_implementation() {
        let state = test_state().with_extractor(Arc::new(StubExtractor));
        assert_eq!(state.extractor.name(), "stub");
    }
}
