use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_faculties, get_faculty_careers};

pub fn init_catalog_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_faculties))
        .route("/{id}/careers", get(get_faculty_careers))
}
