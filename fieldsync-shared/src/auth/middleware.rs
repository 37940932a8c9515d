/// Authentication middleware for Axum
///
/// The gateway extracts `Authorization: Bearer <token>` from each request,
/// runs the fail-quiet token verification, and inserts an [`AuthContext`]
/// into the request extensions for handlers to read via `Extension`.
///
/// Failures are 401 in both shapes the clients distinguish:
/// - header absent or not Bearer-prefixed: "Missing or invalid token"
/// - token present but rejected: "Invalid token"
///
/// Role checks happen per route in the handlers, not here; the gateway only
/// authenticates.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Extension, Router};
/// use fieldsync_shared::auth::middleware::{jwt_auth_middleware, AuthContext};
///
/// async fn protected_handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, {}!", auth.subject)
/// }
///
/// let secret = "your-jwt-secret".to_string();
/// let app: Router = Router::new()
///     .route("/protected", get(protected_handler))
///     .layer(middleware::from_fn(move |req, next| {
///         jwt_auth_middleware(secret.clone(), req, next)
///     }));
/// ```

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::jwt::verify_token;
use crate::models::user::Role;

/// Authentication context added to request extensions
///
/// Handlers extract it with Axum's `Extension` extractor. The subject is
/// the user's email as carried in the token; the role drives per-route
/// authorization checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user's email (token subject)
    pub subject: String,

    /// Role captured at login
    pub role: Role,
}

impl AuthContext {
    /// Creates an auth context from verified token claims
    pub fn new(subject: impl Into<String>, role: Role) -> Self {
        Self {
            subject: subject.into(),
            role,
        }
    }
}

/// Error type for the authentication gateway
#[derive(Debug)]
pub enum AuthError {
    /// Authorization header absent or not Bearer-prefixed
    MissingCredentials,

    /// Token present but failed verification
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingCredentials => {
                (StatusCode::UNAUTHORIZED, "Missing or invalid token")
            }
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
        };

        (
            status,
            Json(json!({ "error": "unauthorized", "message": message })),
        )
            .into_response()
    }
}

/// JWT authentication middleware
///
/// Wire it with a closure that captures the secret:
///
/// ```no_run
/// # use axum::{middleware, Router};
/// # use fieldsync_shared::auth::middleware::jwt_auth_middleware;
/// # let secret = "secret".to_string();
/// # let router: Router = Router::new();
/// router.layer(middleware::from_fn(move |req, next| {
///     jwt_auth_middleware(secret.clone(), req, next)
/// }));
/// ```
///
/// # Errors
///
/// Returns 401 Unauthorized if the header is missing, is not a Bearer
/// token, or the token fails verification (including expiry).
pub async fn jwt_auth_middleware(
    secret: String,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MissingCredentials)?;

    let claims = verify_token(token, &secret).ok_or(AuthError::InvalidToken)?;

    req.extensions_mut()
        .insert(AuthContext::new(claims.sub, claims.role));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_context_new() {
        let context = AuthContext::new("admin@example.org", Role::Admin);

        assert_eq!(context.subject, "admin@example.org");
        assert_eq!(context.role, Role::Admin);
    }

    #[test]
    fn test_auth_error_into_response() {
        let response = AuthError::MissingCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = AuthError::InvalidToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
