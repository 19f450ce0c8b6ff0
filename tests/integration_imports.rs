#![cfg(feature = "integration-tests")]

mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_subject, create_test_user, get_request, test_app, upload_request};
use sqlx::PgPool;
use tower::ServiceExt;

async fn subject_count(pool: &PgPool, owner: carrera_models::ids::UserId) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM subjects WHERE owner_id = $1")
        .bind(owner)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_import_with_header_row(pool: PgPool) {
    let user = create_test_user(&pool).await;
    let csv = "year,duration,name\n1,0,Algebra\n1,1,Analisis Matematico I\n2,2,Fisica II\n";

    let response = test_app(pool.clone())
        .oneshot(upload_request(Some(&user.token), "plan.csv", csv, &[]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["imported"], 3);
    assert_eq!(body["header_skipped"], true);
    assert_eq!(body["committed"], true);
    assert_eq!(body["errors"].as_array().unwrap().len(), 0);

    let statuses: Vec<String> =
        sqlx::query_scalar("SELECT status::text FROM subjects WHERE owner_id = $1")
            .bind(user.id)
            .fetch_all(&pool)
            .await
            .unwrap();
    assert!(statuses.iter().all(|s| s == "not_started"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_best_effort_import_reports_bad_rows(pool: PgPool) {
    let user = create_test_user(&pool).await;
    let csv = "1,0,Algebra\nabc,0,Quimica\n2,7,Fisica\n0,0,Historia\n3,2,\n2,1,Sistemas Operativos\n";

    let response = test_app(pool.clone())
        .oneshot(upload_request(Some(&user.token), "plan.csv", csv, &[]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["imported"], 2);

    let lines: Vec<u64> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["line"].as_u64().unwrap())
        .collect();
    assert_eq!(lines, [2, 3, 4, 5]);
    assert_eq!(subject_count(&pool, user.id).await, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_atomic_import_rolls_back(pool: PgPool) {
    let user = create_test_user(&pool).await;
    let csv = "1,0,Algebra\n1,9,Quimica\n";

    let response = test_app(pool.clone())
        .oneshot(upload_request(
            Some(&user.token),
            "plan.csv",
            csv,
            &[("mode", "atomic")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["committed"], false);
    assert_eq!(body["imported"], 0);
    assert_eq!(body["errors"][0]["line"], 2);
    assert_eq!(subject_count(&pool, user.id).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_rows_are_skipped_on_request(pool: PgPool) {
    let user = create_test_user(&pool).await;
    create_test_subject(&pool, user.id, 1, "Algebra", "approved", Some(8.0)).await;

    let response = test_app(pool.clone())
        .oneshot(upload_request(
            Some(&user.token),
            "plan.csv",
            "1,0,Algebra\n1,0,Fisica I\n",
            &[("on_duplicate", "skip")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["imported"], 1);
    assert_eq!(body["skipped_duplicates"], 1);

    let status: String = sqlx::query_scalar(
        "SELECT status::text FROM subjects WHERE owner_id = $1 AND name = 'Algebra'",
    )
    .bind(user.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(status, "approved");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_rows_are_appended_by_default(pool: PgPool) {
    let user = create_test_user(&pool).await;
    create_test_subject(&pool, user.id, 1, "Algebra", "not_started", None).await;

    let response = test_app(pool.clone())
        .oneshot(upload_request(Some(&user.token), "plan.csv", "1,0,Algebra\n", &[]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(subject_count(&pool, user.id).await, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_imported_subjects_are_listed(pool: PgPool) {
    let user = create_test_user(&pool).await;
    let app = test_app(pool.clone());

    app.clone()
        .oneshot(upload_request(
            Some(&user.token),
            "plan.csv",
            "2,0,Fisica II\n1,2,Quimica\n1,1,Algebra\n",
            &[],
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(get_request("/api/subjects", Some(&user.token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Algebra", "Quimica", "Fisica II"]);
}
