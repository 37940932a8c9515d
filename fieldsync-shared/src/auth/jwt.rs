/// Token service: HS256 token generation and verification
///
/// Tokens carry exactly three claims: the subject email (`sub`), the user's
/// role, and the expiry timestamp (`exp`). The default lifetime is 24 hours.
///
/// Verification is fail-quiet: [`verify_token`] returns `Option<Claims>` and
/// collapses every failure mode (malformed input, bad signature, expiry)
/// into `None`. Callers at the HTTP boundary map `None` to 401 without
/// distinguishing causes. Issuance keeps a `Result`, since a signing failure
/// is a server-side fault worth surfacing.
///
/// # Example
///
/// ```
/// use fieldsync_shared::auth::jwt::{create_token, verify_token, Claims};
/// use fieldsync_shared::models::user::Role;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let claims = Claims::new("worker@example.org", Role::FieldWorker);
/// let token = create_token(&claims, "your-secret-key")?;
///
/// let verified = verify_token(&token, "your-secret-key").expect("token is valid");
/// assert_eq!(verified.sub, "worker@example.org");
/// assert_eq!(verified.role, Role::FieldWorker);
///
/// // Wrong secret: quietly rejected
/// assert!(verify_token(&token, "other-secret").is_none());
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::user::Role;

/// Default token lifetime
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Error type for token issuance
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),
}

/// Token claims
///
/// - `sub`: subject, the user's email
/// - `role`: role at issuance time (role changes require re-login)
/// - `exp`: expiration (Unix timestamp), enforced on every verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user email
    pub sub: String,

    /// Role captured at login
    pub role: Role,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates claims with the default 24 hour expiry
    pub fn new(subject: impl Into<String>, role: Role) -> Self {
        Self::with_ttl(subject, role, Duration::hours(TOKEN_TTL_HOURS))
    }

    /// Creates claims with a custom lifetime
    ///
    /// A negative duration produces an already-expired token, which is how
    /// the expiry tests exercise rejection.
    pub fn with_ttl(subject: impl Into<String>, role: Role, ttl: Duration) -> Self {
        let expiration = Utc::now() + ttl;

        Self {
            sub: subject.into(),
            role,
            exp: expiration.timestamp(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Creates a signed token from claims
///
/// Signs with HS256 (HMAC-SHA256) using the provided secret.
///
/// # Errors
///
/// Returns `TokenError::CreateError` if encoding fails
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| TokenError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Verifies a token and extracts its claims
///
/// Checks the HS256 signature and the `exp` claim. Returns `None` for any
/// invalid token: garbage input, a tampered payload, a wrong signing key,
/// an unexpected algorithm, or expiry. The cause is logged at debug level
/// and deliberately not exposed to callers.
pub fn verify_token(token: &str, secret: &str) -> Option<Claims> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);

    match decode::<Claims>(token, &key, &validation) {
        Ok(token_data) => Some(token_data.claims),
        Err(e) => {
            debug!("token rejected: {}", e);
            None
        }
    }
}
