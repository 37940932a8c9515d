/// Report generation endpoint
///
/// Real report rendering is out of scope; the endpoint serves a fixed
/// placeholder document so clients can exercise their download flow.
///
/// # Endpoints
///
/// - `POST /api/report/generate` - Download the placeholder report

use axum::{
    http::header,
    response::{IntoResponse, Response},
    Extension,
};
use fieldsync_shared::auth::middleware::AuthContext;
use tracing::debug;

/// Placeholder report content
const REPORT_BYTES: &[u8] = b"%PDF-1.4\n%Dummy PDF file for testing\n";

/// Generate (serve) the placeholder report
///
/// Any authenticated role may download it; there is no role gate beyond
/// the bearer token.
///
/// # Endpoint
///
/// ```text
/// POST /api/report/generate
/// Authorization: Bearer <token>
/// ```
///
/// # Response
///
/// `application/pdf` bytes with
/// `Content-Disposition: attachment; filename=report.pdf`.
pub async fn generate_report(Extension(auth): Extension<AuthContext>) -> Response {
    debug!("Report generated for {}", auth.subject);

    (
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=report.pdf",
            ),
        ],
        REPORT_BYTES,
    )
        .into_response()
}
