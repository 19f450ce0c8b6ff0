use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use carrera_core::AppError;
use carrera_models::ids::FacultyId;

use super::model::{Career, FacultyWithCareers};
use super::service::CatalogService;
use crate::state::AppState;

/// List faculties, each with its careers
#[utoipa::path(
    get,
    path = "/api/faculties",
    responses(
        (status = 200, description = "Faculties with their careers", body = Vec<FacultyWithCareers>)
    ),
    tag = "Catalog"
)]
#[instrument(skip(state))]
pub async fn get_faculties(
    State(state): State<AppState>,
) -> Result<Json<Vec<FacultyWithCareers>>, AppError> {
    let faculties = CatalogService::list_faculties_with_careers(&state.db).await?;
    Ok(Json(faculties))
}

/// List the careers of one faculty
#[utoipa::path(
    get,
    path = "/api/faculties/{id}/careers",
    params(
        ("id" = String, Path, description = "Faculty ID")
    ),
    responses(
        (status = 200, description = "Careers of the faculty", body = Vec<Career>),
        (status = 404, description = "Faculty not found")
    ),
    tag = "Catalog"
)]
#[instrument(skip(state))]
pub async fn get_faculty_careers(
    State(state): State<AppState>,
    Path(id): Path<FacultyId>,
) -> Result<Json<Vec<Career>>, AppError> {
    let careers = CatalogService::list_careers(&state.db, id).await?;
    Ok(Json(careers))
}
