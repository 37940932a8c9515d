/// Chat proxy endpoint
///
/// Forwards admin questions to Gemini and relays the answer. The proxy is
/// deliberately soft-failing: a missing key or upstream failure comes back
/// as a normal 200 whose `response` string describes the problem, so the
/// chat UI renders it like any other bot reply.
///
/// # Endpoints
///
/// - `POST /api/chat/query` - Ask the assistant a question

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Extension, Json};
use fieldsync_shared::{
    auth::{authorization::require_role, middleware::AuthContext},
    models::user::Role,
};
use serde::{Deserialize, Serialize};

/// Chat request
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Free-form question for the assistant
    pub query: String,
}

/// Chat response
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Confirmation message
    pub message: String,

    /// Assistant reply (or a human-readable failure description)
    pub response: String,
}

/// Ask the assistant a question
///
/// # Endpoint
///
/// ```text
/// POST /api/chat/query
/// Content-Type: application/json
/// Authorization: Bearer <token>
///
/// { "query": "How many students enrolled this term?" }
/// ```
///
/// # Response
///
/// ```json
/// { "message": "AI response", "response": "Enrollment is up 12%..." }
/// ```
///
/// # Errors
///
/// - `403 Forbidden`: Caller is not an admin
///
/// Upstream failures do not error; they come back in `response`.
pub async fn chat_query(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    require_role(&auth, &[Role::Admin])?;

    let response = state.ai.resolve_query(&req.query).await;

    Ok(Json(ChatResponse {
        message: "AI response".to_string(),
        response,
    }))
}
