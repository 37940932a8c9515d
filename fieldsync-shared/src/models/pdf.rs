/// PDF upload record model
///
/// One row per accepted upload. `filename` is the timestamped name the file
/// was stored under, not the name the client sent. `extracted_data` holds
/// whatever the extractor produced for the stored file.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE pdf_uploads (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     filename TEXT NOT NULL,
///     uploaded_by TEXT NOT NULL,
///     extracted_data JSONB,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use uuid::Uuid;

/// A stored PDF upload record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PdfUpload {
    /// Unique record ID (UUID v4)
    pub id: Uuid,

    /// Stored filename (timestamp prefix + sanitized original name)
    pub filename: String,

    /// Email of the uploading admin
    pub uploaded_by: String,

    /// Extractor output, None when extraction yielded nothing
    pub extracted_data: Option<JsonValue>,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a PDF upload record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePdfUpload {
    /// Stored filename
    pub filename: String,

    /// Email of the uploading admin
    pub uploaded_by: String,

    /// Extractor output
    pub extracted_data: Option<JsonValue>,
}

impl PdfUpload {
    /// Inserts an upload record
    pub async fn create(pool: &PgPool, data: CreatePdfUpload) -> Result<Self, sqlx::Error> {
        let upload = sqlx::query_as::<_, PdfUpload>(
            r#"
            INSERT INTO pdf_uploads (filename, uploaded_by, extracted_data)
            VALUES ($1, $2, $3)
            RETURNING id, filename, uploaded_by, extracted_data, created_at
            "#,
        )
        .bind(data.filename)
        .bind(data.uploaded_by)
        .bind(data.extracted_data)
        .fetch_one(pool)
        .await?;

        Ok(upload)
    }

    /// Finds an upload record by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let upload = sqlx::query_as::<_, PdfUpload>(
            r#"
            SELECT id, filename, uploaded_by, extracted_data, created_at
            FROM pdf_uploads
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(upload)
    }
}
