/// User model and database operations
///
/// This module provides the User model and the `Role` enum used for
/// per-route authorization throughout the API.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE user_role AS ENUM ('field_worker', 'admin', 'analyst');
///
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email TEXT NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     role user_role NOT NULL,
///     is_active BOOLEAN NOT NULL DEFAULT TRUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use fieldsync_shared::models::user::{CreateUser, Role, User};
/// # use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let user = User::create(
///     &pool,
///     CreateUser {
///         email: "admin@example.org".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///         role: Role::Admin,
///     },
/// )
/// .await?;
///
/// let found = User::find_by_email(&pool, "admin@example.org").await?;
/// assert!(found.is_some());
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use uuid::Uuid;

/// User role determining which routes a user may call
///
/// Stored as the Postgres enum `user_role` and carried in token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Submits forms from field devices
    FieldWorker,

    /// Full access: uploads, chat, dashboard, forms
    Admin,

    /// Read-only dashboard access
    Analyst,
}

impl Role {
    /// Converts role to its wire/database string
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::FieldWorker => "field_worker",
            Role::Admin => "admin",
            Role::Analyst => "analyst",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User model representing an account
///
/// Passwords are stored as Argon2id hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Email address, unique across all users
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    /// Role used by per-route authorization checks
    pub role: Role,

    /// Whether the account is active
    ///
    /// Always true at registration; a deactivation flow does not exist yet.
    pub is_active: bool,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address
    pub email: String,

    /// Argon2id password hash (NOT the plaintext password)
    pub password_hash: String,

    /// Role for the new account
    pub role: Role,
}

impl User {
    /// Creates a new user in the database
    ///
    /// # Errors
    ///
    /// Returns an error if the email already exists (unique constraint
    /// violation) or the database is unreachable.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, role, is_active, created_at
            "#,
        )
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.role)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, role, is_active, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Counts total number of users
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::FieldWorker.as_str(), "field_worker");
        assert_eq!(Role::Admin.as_str(), "admin");
        assert_eq!(Role::Analyst.as_str(), "analyst");
    }

    #[test]
    fn test_role_serde_roundtrip() {
        for role in [Role::FieldWorker, Role::Admin, Role::Analyst] {
            let encoded = serde_json::to_string(&role).unwrap();
            assert_eq!(encoded, format!("\"{}\"", role.as_str()));

            let decoded: Role = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, role);
        }
    }

    #[test]
    fn test_role_rejects_unknown_value() {
        let result: Result<Role, _> = serde_json::from_str("\"superuser\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_create_user_struct() {
        let create_user = CreateUser {
            email: "test@example.org".to_string(),
            password_hash: "hash".to_string(),
            role: Role::Analyst,
        };

        assert_eq!(create_user.email, "test@example.org");
        assert_eq!(create_user.role, Role::Analyst);
    }

    // Integration tests for database operations live in the API crate's
    // tests/ directory and require a running database.
}
