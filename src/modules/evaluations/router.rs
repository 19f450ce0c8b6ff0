use axum::{
    Router,
    routing::{post, put},
};

use crate::state::AppState;

use super::controller::{create_evaluation, delete_evaluation, update_evaluation};

/// Routes under `/subjects/{id}/evaluations`.
pub fn init_subject_evaluations_router() -> Router<AppState> {
    Router::new().route("/", post(create_evaluation))
}

pub fn init_evaluations_router() -> Router<AppState> {
    Router::new().route("/{id}", put(update_evaluation).delete(delete_evaluation))
}
