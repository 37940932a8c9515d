/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Router construction with a literal config (no environment reads)
/// - A hermetic context whose pool never connects, for routes that do not
///   reach storage (auth failures, role gates, report, chat without a key)
/// - A database-backed context gated on `TEST_DATABASE_URL`
/// - JWT token generation
/// - Multipart body construction

use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response, Router};
use fieldsync_api::app::{build_router, AppState};
use fieldsync_api::config::{
    AiConfig, ApiConfig, Config, DatabaseConfig, JwtConfig, UploadConfig,
};
use fieldsync_api::services::extractor::{ExtractorError, ExtractorResult, PdfExtractor};
use fieldsync_shared::auth::jwt::{create_token, Claims};
use fieldsync_shared::models::user::Role;
use serde_json::Value as JsonValue;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{path::Path, sync::Arc, time::Duration};
use tempfile::TempDir;
use tower::Service as _;
use uuid::Uuid;

/// Signing secret used by every test context
pub const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: Router,
    pub config: Config,
    pub run_id: String,
    upload_dir: TempDir,
}

impl TestContext {
    /// Creates a context that never touches the database
    ///
    /// The pool is lazy and points at a closed port; only routes that do
    /// not reach storage should be driven through it. The short acquire
    /// timeout keeps accidental storage hits from stalling the suite.
    pub fn hermetic() -> Self {
        let url = "postgres://127.0.0.1:9/fieldsync_test";
        let db = PgPoolOptions::new()
            .max_connections(2)
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy(url)
            .expect("lazy pool construction");

        Self::build(db, url)
    }

    /// Creates a context against the database named by `TEST_DATABASE_URL`
    ///
    /// Returns `None` (with a notice on stderr) when the variable is unset
    /// so storage-backed cases skip cleanly on machines without Postgres.
    pub async fn with_database() -> anyhow::Result<Option<Self>> {
        let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
            eprintln!("TEST_DATABASE_URL not set; skipping database-backed test");
            return Ok(None);
        };

        let db = PgPool::connect(&url).await?;

        // Migration path is relative to Cargo.toml, not this file
        sqlx::migrate!("../migrations").run(&db).await?;

        Ok(Some(Self::build(db, &url)))
    }

    fn build(db: PgPool, url: &str) -> Self {
        let upload_dir = TempDir::new().expect("create upload dir");
        let config = test_config(url, upload_dir.path());

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        TestContext {
            db,
            app,
            config,
            run_id: Uuid::new_v4().simple().to_string(),
            upload_dir,
        }
    }

    /// Rebuilds the router with a different extractor
    pub fn with_extractor(mut self, extractor: Arc<dyn PdfExtractor>) -> Self {
        let state =
            AppState::new(self.db.clone(), self.config.clone()).with_extractor(extractor);
        self.app = build_router(state);
        self
    }

    /// Directory uploads land in for this context
    pub fn upload_path(&self) -> &Path {
        self.upload_dir.path()
    }

    /// Produces a unique email tagged with this context's run id
    pub fn email(&self, prefix: &str) -> String {
        format!("{}-{}@test.example.org", prefix, self.run_id)
    }

    /// Issues a valid bearer token for `email` with `role`
    pub fn token_for(&self, email: &str, role: Role) -> String {
        create_token(&Claims::new(email, role), &self.config.jwt.secret).expect("sign token")
    }

    /// Issues a token that expired beyond the validation leeway
    pub fn expired_token_for(&self, email: &str, role: Role) -> String {
        let claims = Claims::with_ttl(email, role, chrono::Duration::hours(-2));
        create_token(&claims, &self.config.jwt.secret).expect("sign token")
    }

    /// Returns an Authorization header value for `email` with `role`
    pub fn auth_header(&self, email: &str, role: Role) -> String {
        format!("Bearer {}", self.token_for(email, role))
    }

    /// Deletes rows created under this context's run id
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        let tag = format!("%{}%", self.run_id);

        sqlx::query("DELETE FROM form_submissions WHERE submitted_by LIKE $1")
            .bind(&tag)
            .execute(&self.db)
            .await?;
        sqlx::query("DELETE FROM pdf_uploads WHERE uploaded_by LIKE $1")
            .bind(&tag)
            .execute(&self.db)
            .await?;
        sqlx::query("DELETE FROM users WHERE email LIKE $1")
            .bind(&tag)
            .execute(&self.db)
            .await?;

        Ok(())
    }
}

/// Extractor double whose extraction always fails
pub struct FailingExtractor;

#[async_trait]
impl PdfExtractor for FailingExtractor {
    fn name(&self) -> &str {
        "failing"
    }

    async fn extract(&self, _path: &Path) -> ExtractorResult<Option<JsonValue>> {
        Err(ExtractorError::ExtractionFailed(
            "simulated failure".to_string(),
        ))
    }
}

/// Sends a request through a clone of the router
pub async fn send(ctx: &TestContext, request: Request<Body>) -> Response {
    ctx.app
        .clone()
        .call(request)
        .await
        .expect("router call is infallible")
}

/// Reads a response body as JSON
pub async fn body_json(response: Response) -> JsonValue {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse body as JSON")
}

/// Builds a one-part multipart body
///
/// With `filename` the part is a file part, otherwise a plain text field.
pub fn multipart_body(
    boundary: &str,
    field: &str,
    filename: Option<&str>,
    content: &[u8],
) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());

    match filename {
        Some(name) => body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/pdf\r\n\r\n",
                field, name
            )
            .as_bytes(),
        ),
        None => body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", field).as_bytes(),
        ),
    }

    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    body
}

fn test_config(url: &str, upload_dir: &Path) -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["http://localhost:3000".to_string()],
        },
        database: DatabaseConfig {
            url: url.to_string(),
            max_connections: 2,
        },
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
        },
        ai: AiConfig { api_key: None },
        uploads: UploadConfig {
            dir: upload_dir.to_path_buf(),
        },
    }
}
