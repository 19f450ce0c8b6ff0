use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use carrera_core::AppError;
use carrera_models::ids::SubjectId;

use super::model::{PrerequisiteFormDto, PrerequisiteLinks};
use super::service::PrerequisiteService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedForm;

/// Prerequisites of a subject and the subjects that require it
#[utoipa::path(
    get,
    path = "/api/subjects/{id}/prerequisites",
    params(
        ("id" = String, Path, description = "Subject ID")
    ),
    responses(
        (status = 200, description = "Prerequisite links", body = PrerequisiteLinks),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Subject belongs to another user"),
        (status = 404, description = "Subject not found")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_prerequisites(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(subject_id): Path<SubjectId>,
) -> Result<Json<PrerequisiteLinks>, AppError> {
    let links =
        PrerequisiteService::list_prerequisites(&state.db, auth_user.user_id()?, subject_id)
            .await?;
    Ok(Json(links))
}

#[utoipa::path(
    post,
    path = "/api/subjects/{id}/prerequisites",
    params(
        ("id" = String, Path, description = "Subject ID")
    ),
    request_body(content = PrerequisiteFormDto, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Prerequisite linked", body = PrerequisiteLinks),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "A subject belongs to another user"),
        (status = 404, description = "Subject not found"),
        (status = 422, description = "The link would create a cycle")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn add_prerequisite(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(subject_id): Path<SubjectId>,
    ValidatedForm(dto): ValidatedForm<PrerequisiteFormDto>,
) -> Result<(StatusCode, Json<PrerequisiteLinks>), AppError> {
    let links = PrerequisiteService::add_prerequisite(
        &state.db,
        auth_user.user_id()?,
        subject_id,
        dto.prerequisite_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(links)))
}

#[utoipa::path(
    delete,
    path = "/api/subjects/{id}/prerequisites/{prerequisite_id}",
    params(
        ("id" = String, Path, description = "Subject ID"),
        ("prerequisite_id" = String, Path, description = "Prerequisite subject ID")
    ),
    responses(
        (status = 204, description = "Prerequisite unlinked"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Subject belongs to another user"),
        (status = 404, description = "Subject or link not found")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn remove_prerequisite(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((subject_id, prerequisite_id)): Path<(SubjectId, SubjectId)>,
) -> Result<StatusCode, AppError> {
    PrerequisiteService::remove_prerequisite(
        &state.db,
        auth_user.user_id()?,
        subject_id,
        prerequisite_id,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}
