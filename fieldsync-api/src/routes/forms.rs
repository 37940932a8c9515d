/// Form submission sync endpoint
///
/// Field workers collect forms offline and push them up in batches when
/// connectivity returns. The batch is processed item by item in input
/// order and never aborts: each failed item contributes an error string
/// while the rest still save.
///
/// # Endpoints
///
/// - `POST /api/forms/sync` - Sync a batch of form payloads

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Extension, Json};
use fieldsync_shared::{
    auth::{authorization::require_role, middleware::AuthContext},
    models::{
        form::{CreateFormSubmission, FormSubmission},
        user::Role,
    },
};
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

/// Sync response
#[derive(Debug, Serialize)]
pub struct SyncResponse {
    /// Confirmation message
    pub message: String,

    /// Number of payloads stored
    pub saved: usize,

    /// Per-item failure descriptions, in input order
    pub errors: Vec<String>,
}

/// Sync a batch of form payloads
///
/// Accepts an array of opaque JSON payloads and stores each one as a
/// `FormSubmission` attributed to the authenticated user. Payloads are
/// schemaless by design; the only structural requirement is that each
/// one is a JSON object.
///
/// # Endpoint
///
/// ```text
/// POST /api/forms/sync
/// Content-Type: application/json
/// Authorization: Bearer <token>
///
/// [
///   { "studentName": "Amina", "attendance": "present" },
///   { "studentName": "Joseph", "healthStatus": "poor" }
/// ]
/// ```
///
/// # Response
///
/// ```json
/// { "message": "Forms synced", "saved": 2, "errors": [] }
/// ```
///
/// # Errors
///
/// - `403 Forbidden`: Caller is not a field worker or admin
///
/// Item-level failures are reported in `errors`, not as an HTTP error.
pub async fn sync_forms(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(forms): Json<Vec<JsonValue>>,
) -> ApiResult<Json<SyncResponse>> {
    require_role(&auth, &[Role::FieldWorker, Role::Admin])?;

    let mut saved = 0;
    let mut errors = Vec::new();

    // Sequential on purpose: error order must match input order
    for form in forms {
        let create = CreateFormSubmission {
            data: form,
            submitted_by: auth.subject.clone(),
            synced: true,
        };

        match FormSubmission::create(&state.db, create).await {
            Ok(_) => saved += 1,
            Err(err) => {
                warn!("Form from {} rejected: {}", auth.subject, err);
                errors.push(err.to_string());
            }
        }
    }

    debug!(
        "Synced {} forms for {} ({} rejected)",
        saved,
        auth.subject,
        errors.len()
    );

    Ok(Json(SyncResponse {
        message: "Forms synced".to_string(),
        saved,
        errors,
    }))
}
