use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_calendar, get_dashboard};

pub fn init_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_dashboard))
        .route("/calendar", get(get_calendar))
}
