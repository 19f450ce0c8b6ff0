#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response, header};
use carrera::router::init_router;
use carrera::state::AppState;
use carrera_auth::create_access_token;
use carrera_config::{CalendarConfig, CorsConfig, ImportConfig, JwtConfig};
use carrera_core::hash_password;
use carrera_models::ids::{CareerId, FacultyId, SubjectId, UserId};
use http_body_util::BodyExt;
use sqlx::PgPool;
use uuid::Uuid;

pub const BOUNDARY: &str = "carrera-test-boundary";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

pub fn test_state(pool: PgPool) -> AppState {
    AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        import_config: ImportConfig::default(),
        calendar_config: CalendarConfig::default(),
    }
}

pub fn test_app(pool: PgPool) -> axum::Router {
    init_router(test_state(pool))
}

/// App with a custom upload configuration, e.g. a tiny `max_bytes`.
pub fn test_app_with_import(pool: PgPool, import_config: ImportConfig) -> axum::Router {
    let mut state = test_state(pool);
    state.import_config = import_config;
    init_router(state)
}

pub fn unique_username() -> String {
    format!("user_{}", &Uuid::new_v4().simple().to_string()[..12])
}

pub struct TestUser {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

pub struct TestCatalog {
    pub faculty_id: FacultyId,
    pub career_id: CareerId,
}

pub async fn create_test_catalog(pool: &PgPool) -> TestCatalog {
    let faculty_id: FacultyId = sqlx::query_scalar(
        "INSERT INTO faculties (name, acronym) VALUES ($1, 'FI') RETURNING id",
    )
    .bind(format!("Facultad {}", Uuid::new_v4()))
    .fetch_one(pool)
    .await
    .unwrap();

    let career_id: CareerId =
        sqlx::query_scalar("INSERT INTO careers (faculty_id, name) VALUES ($1, $2) RETURNING id")
            .bind(faculty_id)
            .bind("Ingenieria en Sistemas")
            .fetch_one(pool)
            .await
            .unwrap();

    TestCatalog {
        faculty_id,
        career_id,
    }
}

pub async fn create_test_user(pool: &PgPool) -> TestUser {
    let username = unique_username();
    let email = format!("{username}@example.com");
    let password = "testpass123".to_string();
    let hashed = hash_password(&password).unwrap();

    let id: UserId = sqlx::query_scalar(
        "INSERT INTO users (username, email, password) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(&username)
    .bind(&email)
    .bind(&hashed)
    .fetch_one(pool)
    .await
    .unwrap();

    sqlx::query("INSERT INTO profiles (user_id) VALUES ($1)")
        .bind(id)
        .execute(pool)
        .await
        .unwrap();

    let token =
        create_access_token(id.into_inner(), &username, &email, &test_jwt_config()).unwrap();

    TestUser {
        id,
        username,
        email,
        password,
        token,
    }
}

pub async fn create_test_subject(
    pool: &PgPool,
    owner_id: UserId,
    year: i32,
    name: &str,
    status: &str,
    final_grade: Option<f64>,
) -> SubjectId {
    sqlx::query_scalar(
        r#"INSERT INTO subjects (owner_id, name, year, duration, status, final_grade)
           VALUES ($1, $2, $3, 0, $4::subject_status, $5)
           RETURNING id"#,
    )
    .bind(owner_id)
    .bind(name)
    .bind(year)
    .bind(status)
    .bind(final_grade)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub fn form_request(method: &str, uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

/// Multipart plan upload with a `file` part and optional policy parts.
pub fn upload_request(
    token: Option<&str>,
    filename: &str,
    contents: &str,
    parts: &[(&str, &str)],
) -> Request<Body> {
    let mut body = String::new();
    for (name, value) in parts {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: text/csv\r\n\r\n{contents}\r\n--{BOUNDARY}--\r\n"
    ));

    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/subjects/import")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body)).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
