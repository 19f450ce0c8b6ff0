use axum::{
    Router,
    routing::{delete, get},
};

use crate::state::AppState;

use super::controller::{add_prerequisite, get_prerequisites, remove_prerequisite};

/// Routes under `/subjects/{id}/prerequisites`.
pub fn init_prerequisites_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_prerequisites).post(add_prerequisite))
        .route("/{prerequisite_id}", delete(remove_prerequisite))
}
