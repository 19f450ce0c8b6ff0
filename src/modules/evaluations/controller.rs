use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use carrera_core::AppError;
use carrera_models::ids::{EvaluationId, SubjectId};

use super::model::{Evaluation, EvaluationFormDto};
use super::service::EvaluationService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedForm;

/// Add an evaluation to one of the user's subjects
#[utoipa::path(
    post,
    path = "/api/subjects/{id}/evaluations",
    params(
        ("id" = String, Path, description = "Subject ID")
    ),
    request_body(content = EvaluationFormDto, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Evaluation created", body = Evaluation),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Subject belongs to another user"),
        (status = 404, description = "Subject not found"),
        (status = 422, description = "Grade out of range or notes too long")
    ),
    tag = "Evaluations",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_evaluation(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(subject_id): Path<SubjectId>,
    ValidatedForm(dto): ValidatedForm<EvaluationFormDto>,
) -> Result<(StatusCode, Json<Evaluation>), AppError> {
    let evaluation =
        EvaluationService::create_evaluation(&state.db, auth_user.user_id()?, subject_id, dto)
            .await?;
    Ok((StatusCode::CREATED, Json(evaluation)))
}

#[utoipa::path(
    put,
    path = "/api/evaluations/{id}",
    params(
        ("id" = String, Path, description = "Evaluation ID")
    ),
    request_body(content = EvaluationFormDto, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Evaluation updated", body = Evaluation),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Evaluation belongs to another user"),
        (status = 404, description = "Evaluation not found"),
        (status = 422, description = "Grade out of range or notes too long")
    ),
    tag = "Evaluations",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_evaluation(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<EvaluationId>,
    ValidatedForm(dto): ValidatedForm<EvaluationFormDto>,
) -> Result<Json<Evaluation>, AppError> {
    let evaluation =
        EvaluationService::update_evaluation(&state.db, auth_user.user_id()?, id, dto).await?;
    Ok(Json(evaluation))
}

#[utoipa::path(
    delete,
    path = "/api/evaluations/{id}",
    params(
        ("id" = String, Path, description = "Evaluation ID")
    ),
    responses(
        (status = 204, description = "Evaluation deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Evaluation belongs to another user"),
        (status = 404, description = "Evaluation not found")
    ),
    tag = "Evaluations",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_evaluation(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<EvaluationId>,
) -> Result<StatusCode, AppError> {
    EvaluationService::delete_evaluation(&state.db, auth_user.user_id()?, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
