/// Authorization helpers for role-based access control
///
/// Every protected route names the set of roles allowed to call it and
/// checks membership in its handler. There is no role hierarchy: an admin
/// is allowed where the route lists Admin, not by outranking anyone.
///
/// # Route Role Sets
///
/// - form sync: field_worker, admin
/// - PDF upload: admin
/// - dashboard summary: admin, analyst
/// - chat: admin
/// - report: any authenticated role
///
/// # Example
///
/// ```
/// use fieldsync_shared::auth::authorization::require_role;
/// use fieldsync_shared::auth::middleware::AuthContext;
/// use fieldsync_shared::models::user::Role;
///
/// let auth = AuthContext::new("worker@example.org", Role::FieldWorker);
///
/// assert!(require_role(&auth, &[Role::FieldWorker, Role::Admin]).is_ok());
/// assert!(require_role(&auth, &[Role::Admin]).is_err());
/// ```

use super::middleware::AuthContext;
use crate::models::user::Role;

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// Authenticated user's role is not in the route's allowed set
    #[error("Not authorized")]
    RoleNotAllowed {
        /// The role the caller actually holds
        actual: Role,
    },
}

/// Checks that the authenticated role is in the allowed set
///
/// # Errors
///
/// Returns `AuthzError::RoleNotAllowed` when the caller's role is not
/// listed; the boundary maps this to 403.
pub fn require_role(auth: &AuthContext, allowed: &[Role]) -> Result<(), AuthzError> {
    if allowed.contains(&auth.role) {
        Ok(())
    } else {
        Err(AuthzError::RoleNotAllowed { actual: auth.role })
    }
}
