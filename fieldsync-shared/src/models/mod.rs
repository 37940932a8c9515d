/// Database models for FieldSync
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts with roles (field_worker, admin, analyst)
/// - `form`: Form submissions synced from field devices
/// - `pdf`: Uploaded PDF records with extracted data
///
/// # Example
///
/// ```no_run
/// use fieldsync_shared::models::user::{CreateUser, Role, User};
/// use fieldsync_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// })
/// .await?;
///
/// let user = User::create(
///     &pool,
///     CreateUser {
///         email: "worker@example.org".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///         role: Role::FieldWorker,
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod form;
pub mod pdf;
pub mod user;
