use axum::{Json, extract::State};
use tracing::instrument;

use carrera_core::AppError;

use super::model::{ProfileResponse, UpdateProfileDto};
use super::service::ProfileService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedForm;

/// Get the current user's profile
#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Current profile", body = ProfileResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Profile",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = ProfileService::get_profile(&state.db, auth_user.user_id()?).await?;
    Ok(Json(profile))
}

/// Update email, faculty and career
#[utoipa::path(
    put,
    path = "/api/profile",
    request_body(content = UpdateProfileDto, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Unknown faculty, career outside faculty or email taken"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Validation error")
    ),
    tag = "Profile",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedForm(dto): ValidatedForm<UpdateProfileDto>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = ProfileService::update_profile(&state.db, auth_user.user_id()?, dto).await?;
    Ok(Json(profile))
}
