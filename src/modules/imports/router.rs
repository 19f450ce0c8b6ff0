use axum::{Router, extract::DefaultBodyLimit, routing::post};

use crate::state::AppState;

use super::controller::import_plan;

/// Multipart overhead allowed on top of the file size limit.
const FORM_OVERHEAD: usize = 64 * 1024;

/// Routes under `/subjects`, limited to `max_bytes` of CSV per upload.
pub fn init_imports_router(max_bytes: usize) -> Router<AppState> {
    Router::new().route(
        "/import",
        post(import_plan).layer(DefaultBodyLimit::max(max_bytes + FORM_OVERHEAD)),
    )
}
