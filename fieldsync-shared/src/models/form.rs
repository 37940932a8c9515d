/// Form submission model and database operations
///
/// Submissions arrive in batches from field devices that queued them
/// offline. Each payload is an opaque JSON object; the application never
/// interprets its keys except in dashboard aggregation. Rows are append-only:
/// nothing updates or deletes them.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE form_submissions (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     data JSONB NOT NULL CHECK (jsonb_typeof(data) = 'object'),
///     submitted_by TEXT NOT NULL,
///     synced BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use uuid::Uuid;

/// Error type for submission writes
///
/// The batch sync endpoint collects these per item as strings; a failing
/// item must not abort the rest of the batch.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// Payload was not a JSON object
    #[error("submission payload must be a JSON object")]
    PayloadNotObject,

    /// Database write failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A stored form submission
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FormSubmission {
    /// Unique submission ID (UUID v4)
    pub id: Uuid,

    /// Opaque form payload (always a JSON object)
    pub data: JsonValue,

    /// Email of the user who synced this submission
    pub submitted_by: String,

    /// Whether the row was written through the sync endpoint
    pub synced: bool,

    /// Server-side arrival time; drives the dashboard growth windows
    pub created_at: DateTime<Utc>,
}

/// Input for creating a form submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFormSubmission {
    /// Opaque form payload; must be a JSON object
    pub data: JsonValue,

    /// Email of the syncing user
    pub submitted_by: String,

    /// Sync flag (the sync endpoint always sets true)
    pub synced: bool,
}

impl FormSubmission {
    /// Inserts a single submission
    ///
    /// Rejects non-object payloads before touching the database; the JSONB
    /// CHECK constraint backstops the same rule.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionError::PayloadNotObject` for non-object payloads,
    /// `SubmissionError::Database` for any storage failure.
    pub async fn create(
        pool: &PgPool,
        data: CreateFormSubmission,
    ) -> Result<Self, SubmissionError> {
        if !data.data.is_object() {
            return Err(SubmissionError::PayloadNotObject);
        }

        let submission = sqlx::query_as::<_, FormSubmission>(
            r#"
            INSERT INTO form_submissions (data, submitted_by, synced)
            VALUES ($1, $2, $3)
            RETURNING id, data, submitted_by, synced, created_at
            "#,
        )
        .bind(data.data)
        .bind(data.submitted_by)
        .bind(data.synced)
        .fetch_one(pool)
        .await?;

        Ok(submission)
    }

    /// Lists every stored submission, oldest first
    ///
    /// The dashboard aggregates over the full table; there is no pagination
    /// on this path.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let submissions = sqlx::query_as::<_, FormSubmission>(
            r#"
            SELECT id, data, submitted_by, synced, created_at
            FROM form_submissions
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(submissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_submission_error_messages() {
        let err = SubmissionError::PayloadNotObject;
        assert_eq!(err.to_string(), "submission payload must be a JSON object");
    }

    #[test]
    fn test_create_submission_struct() {
        let input = CreateFormSubmission {
            data: json!({"studentName": "Amina", "attendance": "present"}),
            submitted_by: "worker@example.org".to_string(),
            synced: true,
        };

        assert!(input.data.is_object());
        assert!(input.synced);
    }
}
