use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::modules::auth::init_auth_router;
use crate::modules::catalog::init_catalog_router;
use crate::modules::dashboard::init_dashboard_router;
use crate::modules::evaluations::{init_evaluations_router, init_subject_evaluations_router};
use crate::modules::imports::init_imports_router;
use crate::modules::prerequisites::init_prerequisites_router;
use crate::modules::profiles::init_profile_router;
use crate::modules::subjects::init_subjects_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_config.allowed_origins);
    let max_upload = state.import_config.max_bytes;

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest("/faculties", init_catalog_router())
                .nest("/profile", init_profile_router())
                .nest(
                    "/subjects",
                    init_subjects_router()
                        .merge(init_imports_router(max_upload))
                        .nest("/{id}/evaluations", init_subject_evaluations_router())
                        .nest("/{id}/prerequisites", init_prerequisites_router()),
                )
                .nest("/evaluations", init_evaluations_router())
                .nest("/dashboard", init_dashboard_router()),
        )
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}
