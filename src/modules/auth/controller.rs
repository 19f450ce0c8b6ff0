use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use carrera_core::AppError;

use super::model::{ErrorResponse, LoginRequest, LoginResponse, RegisterRequest, User};
use super::service::AuthService;
use crate::state::AppState;
use crate::validator::ValidatedForm;

/// Create an account and its profile
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body(content = RegisterRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "User registered", body = User),
        (status = 400, description = "Username or email taken, or career outside faculty", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedForm(dto): ValidatedForm<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = AuthService::register_user(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Log in with username or email and receive an access token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body(content = LoginRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedForm(dto): ValidatedForm<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login_user(&state.db, dto, &state.jwt_config).await?;
    Ok(Json(response))
}
