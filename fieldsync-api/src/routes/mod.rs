/// API route handlers
///
/// Each submodule owns one resource of the HTTP surface:
/// - `health` - service liveness and database connectivity
/// - `auth` - registration and login
/// - `forms` - offline form submission sync
/// - `uploads` - multipart PDF upload and extraction
/// - `dashboard` - aggregated submission summary
/// - `report` - placeholder report download
/// - `chat` - Gemini chat proxy
///
/// Role gates live inside the handlers; the router only distinguishes
/// public routes from bearer-authenticated ones.

pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod forms;
pub mod health;
pub mod report;
pub mod uploads;
