/// Authentication and authorization utilities
///
/// This module provides the security primitives for FieldSync:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: Token service (HS256, 24 h default expiry, fail-quiet verify)
/// - [`middleware`]: Bearer-token gateway inserting [`middleware::AuthContext`]
/// - [`authorization`]: Per-route role gates
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Tokens**: HS256 signing, expiry enforced on every verification
/// - **Constant-time Comparison**: Verification uses constant-time operations
///
/// # Example
///
/// ```
/// use fieldsync_shared::auth::jwt::{create_token, verify_token, Claims};
/// use fieldsync_shared::auth::password::{hash_password, verify_password};
/// use fieldsync_shared::models::user::Role;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Password authentication
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// // Token issuance and verification
/// let claims = Claims::new("worker@example.org", Role::FieldWorker);
/// let token = create_token(&claims, "secret-key")?;
/// assert!(verify_token(&token, "secret-key").is_some());
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod jwt;
pub mod middleware;
pub mod password;
