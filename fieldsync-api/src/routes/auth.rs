/// Authentication endpoints
///
/// This module provides user authentication endpoints:
/// - Registration
/// - Login
///
/// Sessions are stateless: login issues a 24 h bearer token and nothing
/// is persisted about it. There is no refresh flow; clients log in again
/// when the token expires.
///
/// # Endpoints
///
/// - `POST /api/auth/register` - Register new user
/// - `POST /api/auth/login` - Login and get a token

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Json};
use fieldsync_shared::{
    auth::{jwt, password},
    models::user::{CreateUser, Role, User},
};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (stored as an Argon2id hash)
    pub password: String,

    /// Requested role
    pub role: Role,
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Confirmation message
    pub message: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Access token (24h)
    pub access_token: String,

    /// Token type, always "bearer"
    pub token_type: String,

    /// Role of the authenticated user
    pub role: Role,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/register
/// Content-Type: application/json
///
/// {
///   "email": "worker@ngo.org",
///   "password": "secret",
///   "role": "field_worker"
/// }
/// ```
///
/// # Response
///
/// ```json
/// { "message": "User registered" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Email already registered
/// - `422 Unprocessable Entity`: Invalid email format
/// - `500 Internal Server Error`: Server error
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    // Validate request
    req.validate()?;

    // Reject duplicates before hashing; a concurrent registration still
    // trips the unique constraint, which maps to the same 400
    if User::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(ApiError::BadRequest("Email already registered".to_string()));
    }

    // Hash password
    let password_hash = password::hash_password(&req.password)?;

    // Create user
    let user = User::create(
        &state.db,
        CreateUser {
            email: req.email,
            password_hash,
            role: req.role,
        },
    )
    .await?;

    info!("Registered {} as {}", user.email, user.role);

    Ok(Json(RegisterResponse {
        message: "User registered".to_string(),
    }))
}

/// Login endpoint
///
/// Authenticates a user and returns a bearer token carrying the email
/// and role as claims.
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/login
/// Content-Type: application/json
///
/// {
///   "email": "worker@ngo.org",
///   "password": "secret"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "access_token": "eyJ...",
///   "token_type": "bearer",
///   "role": "field_worker"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Invalid credentials (unknown email or wrong password)
/// - `422 Unprocessable Entity`: Invalid email format
/// - `500 Internal Server Error`: Server error
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    // Validate request
    req.validate()?;

    // Find user by email; unknown emails get the same reply as bad
    // passwords so login does not leak which emails exist
    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    // Verify password
    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    // Generate token
    let claims = jwt::Claims::new(user.email, user.role);
    let access_token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer".to_string(),
        role: user.role,
    }))
}
