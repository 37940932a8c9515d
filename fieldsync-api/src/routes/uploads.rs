/// PDF upload endpoint
///
/// Admins upload scanned report PDFs through a multipart form. The file is
/// streamed to the upload directory under a timestamp-prefixed sanitized
/// name, handed to the extractor, and recorded in `pdf_uploads` with
/// whatever the extractor produced.
///
/// Two known gaps, accepted for now: two uploads of the same filename in
/// the same second collide, and a file already written to disk is not
/// removed when a later step fails.
///
/// # Endpoints
///
/// - `POST /api/upload-pdf/` - Upload one PDF (multipart field `file`)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::Multipart, extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use fieldsync_shared::{
    auth::{authorization::require_role, middleware::AuthContext},
    models::{
        pdf::{CreatePdfUpload, PdfUpload},
        user::Role,
    },
};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::path::PathBuf;
use tokio::{fs, fs::File, io::AsyncWriteExt};
use tracing::info;

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Confirmation message
    pub message: String,

    /// Stored filename (timestamp-prefixed)
    pub filename: String,

    /// Data the extractor pulled from the document
    pub extracted: Option<JsonValue>,
}

/// Upload a PDF and run extraction on it
///
/// # Endpoint
///
/// ```text
/// POST /api/upload-pdf/
/// Content-Type: multipart/form-data
/// Authorization: Bearer <token>
///
/// file=<binary pdf>
/// ```
///
/// # Response
///
/// ```json
/// {
///   "message": "PDF uploaded and processed",
///   "filename": "20250810093000_survey.pdf",
///   "extracted": {}
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing `file` field or malformed multipart body
/// - `403 Forbidden`: Caller is not an admin
/// - `500 Internal Server Error`: Disk write, extraction, or insert failed
///   (the body carries the failure text)
pub async fn upload_pdf(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    require_role(&auth, &[Role::Admin])?;

    let mut stored: Option<(String, PathBuf)> = None;

    while let Some(mut field) = multipart.next_field().await.map_err(|err| {
        ApiError::BadRequest(format!("Malformed multipart request: {}", err))
    })? {
        if field.name() != Some("file") {
            continue;
        }

        let original = field.file_name().unwrap_or("upload.pdf").to_string();
        let filename = stamped_filename(Utc::now(), &original);

        fs::create_dir_all(&state.config.uploads.dir)
            .await
            .map_err(|err| {
                ApiError::InternalError(format!("Failed to create upload directory: {}", err))
            })?;

        let path = state.config.uploads.dir.join(&filename);
        let mut file = File::create(&path).await.map_err(|err| {
            ApiError::InternalError(format!("Failed to create {}: {}", filename, err))
        })?;

        while let Some(chunk) = field.chunk().await.map_err(|err| {
            ApiError::BadRequest(format!("Failed to read upload: {}", err))
        })? {
            file.write_all(&chunk).await.map_err(|err| {
                ApiError::InternalError(format!("Failed to write {}: {}", filename, err))
            })?;
        }
        file.flush().await.map_err(|err| {
            ApiError::InternalError(format!("Failed to flush {}: {}", filename, err))
        })?;

        stored = Some((filename, path));
        break;
    }

    let Some((filename, path)) = stored else {
        return Err(ApiError::BadRequest("Missing 'file' field".to_string()));
    };

    // Run extraction on the stored file
    let extracted = state.extractor.extract(&path).await?;

    // Record the upload
    let upload = PdfUpload::create(
        &state.db,
        CreatePdfUpload {
            filename,
            uploaded_by: auth.subject.clone(),
            extracted_data: extracted.clone(),
        },
    )
    .await?;

    info!("Stored {} from {}", upload.filename, auth.subject);

    Ok(Json(UploadResponse {
        message: "PDF uploaded and processed".to_string(),
        filename: upload.filename,
        extracted,
    }))
}

/// Builds the stored filename: `YYYYmmddHHMMSS_` + sanitized original
///
/// Sanitization strips path separators and other unsafe characters so a
/// crafted original name cannot escape the upload directory. An original
/// that sanitizes to nothing falls back to `upload.pdf`.
fn stamped_filename(now: DateTime<Utc>, original: &str) -> String {
    let mut sanitized = sanitize_filename::sanitize(original);
    if sanitized.is_empty() {
        sanitized = "upload.pdf".to_string();
    }

    format!("{}_{}", now.format("%Y%m%d%H%M%S"), sanitized)
}
