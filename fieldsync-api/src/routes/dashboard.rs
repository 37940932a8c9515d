/// Dashboard summary endpoint
///
/// # Endpoints
///
/// - `GET /api/dashboard/summary` - Aggregated submission metrics

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Extension, Json};
use fieldsync_shared::{
    auth::{authorization::require_role, middleware::AuthContext},
    dashboard::{self, DashboardSummary},
    models::user::Role,
};

/// Aggregated submission metrics
///
/// Scans every stored submission and reports student, teacher, attendance,
/// alert and growth figures. A storage failure degrades to the all-zero
/// summary rather than an error; the dashboard always renders.
///
/// # Endpoint
///
/// ```text
/// GET /api/dashboard/summary
/// Authorization: Bearer <token>
/// ```
///
/// # Response
///
/// ```json
/// {
///   "students": 42,
///   "teachers": 3,
///   "attendance": 87.5,
///   "alerts": 2,
///   "growth": 12.0
/// }
/// ```
///
/// # Errors
///
/// - `403 Forbidden`: Caller is not an admin or analyst
pub async fn dashboard_summary(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<DashboardSummary>> {
    require_role(&auth, &[Role::Admin, Role::Analyst])?;

    Ok(Json(dashboard::summarize(&state.db).await))
}
