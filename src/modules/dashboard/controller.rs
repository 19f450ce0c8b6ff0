use axum::{Json, extract::State};
use chrono::Local;
use tracing::instrument;

use carrera_core::AppError;

use super::model::{CalendarQuery, CalendarResponse, DashboardResponse};
use super::service::DashboardService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedQuery;

/// Progress per year, general average and upcoming evaluations
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Dashboard",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<DashboardResponse>, AppError> {
    let window = state.calendar_config.window(None);
    let today = Local::now().date_naive();

    let dashboard =
        DashboardService::get_dashboard(&state.db, auth_user.user_id()?, today, window).await?;
    Ok(Json(dashboard))
}

/// Upcoming evaluations, optionally limited to the next `days` days
#[utoipa::path(
    get,
    path = "/api/dashboard/calendar",
    params(CalendarQuery),
    responses(
        (status = 200, description = "Upcoming evaluations", body = CalendarResponse),
        (status = 400, description = "Invalid days parameter"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Dashboard",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_calendar(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedQuery(query): ValidatedQuery<CalendarQuery>,
) -> Result<Json<CalendarResponse>, AppError> {
    let window = state.calendar_config.window(query.days);
    let today = Local::now().date_naive();

    let calendar =
        DashboardService::get_calendar(&state.db, auth_user.user_id()?, today, window).await?;
    Ok(Json(calendar))
}
