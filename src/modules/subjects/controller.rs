use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use carrera_core::AppError;
use carrera_models::ids::SubjectId;

use super::model::{CreateSubjectDto, Subject, SubjectDetail, UpdateSubjectDto};
use super::service::SubjectService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedForm;

/// List the current user's subjects ordered by year, duration and name
#[utoipa::path(
    get,
    path = "/api/subjects",
    responses(
        (status = 200, description = "Subjects of the current user", body = Vec<Subject>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_subjects(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<Subject>>, AppError> {
    let subjects = SubjectService::list_subjects(&state.db, auth_user.user_id()?).await?;
    Ok(Json(subjects))
}

/// Add one subject to the plan
#[utoipa::path(
    post,
    path = "/api/subjects",
    request_body(content = CreateSubjectDto, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Subject created", body = Subject),
        (status = 400, description = "Malformed form"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Invalid year, duration, name or grade")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_subject(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedForm(dto): ValidatedForm<CreateSubjectDto>,
) -> Result<(StatusCode, Json<Subject>), AppError> {
    let subject = SubjectService::create_subject(&state.db, auth_user.user_id()?, dto).await?;
    Ok((StatusCode::CREATED, Json(subject)))
}

/// Subject with its evaluations and their average
#[utoipa::path(
    get,
    path = "/api/subjects/{id}",
    params(
        ("id" = String, Path, description = "Subject ID")
    ),
    responses(
        (status = 200, description = "Subject detail", body = SubjectDetail),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Subject belongs to another user"),
        (status = 404, description = "Subject not found")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_subject(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<SubjectId>,
) -> Result<Json<SubjectDetail>, AppError> {
    let detail = SubjectService::get_subject_detail(&state.db, auth_user.user_id()?, id).await?;
    Ok(Json(detail))
}

/// Edit status, grades, duration, year, name or description
#[utoipa::path(
    put,
    path = "/api/subjects/{id}",
    params(
        ("id" = String, Path, description = "Subject ID")
    ),
    request_body(content = UpdateSubjectDto, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Subject updated", body = Subject),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Subject belongs to another user"),
        (status = 404, description = "Subject not found"),
        (status = 422, description = "Invalid status change or field value")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_subject(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<SubjectId>,
    ValidatedForm(dto): ValidatedForm<UpdateSubjectDto>,
) -> Result<Json<Subject>, AppError> {
    let subject = SubjectService::update_subject(&state.db, auth_user.user_id()?, id, dto).await?;
    Ok(Json(subject))
}

/// Delete a subject and its evaluations
#[utoipa::path(
    delete,
    path = "/api/subjects/{id}",
    params(
        ("id" = String, Path, description = "Subject ID")
    ),
    responses(
        (status = 204, description = "Subject deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Subject belongs to another user"),
        (status = 404, description = "Subject not found")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_subject(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<SubjectId>,
) -> Result<StatusCode, AppError> {
    SubjectService::delete_subject(&state.db, auth_user.user_id()?, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
