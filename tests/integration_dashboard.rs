#![cfg(feature = "integration-tests")]

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Local};
use common::{body_json, create_test_subject, create_test_user, get_request, test_app};
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_dashboard_progress_per_year(pool: PgPool) {
    let user = create_test_user(&pool).await;
    create_test_subject(&pool, user.id, 1, "Algebra", "approved", Some(8.0)).await;
    create_test_subject(&pool, user.id, 1, "Fisica I", "in_progress", None).await;
    create_test_subject(&pool, user.id, 3, "Redes", "approved", Some(7.0)).await;

    let response = test_app(pool)
        .oneshot(get_request("/api/dashboard", Some(&user.token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let years = body["years"].as_array().unwrap();
    assert_eq!(years.len(), 3);

    assert_eq!(years[0]["label"], "Year 1");
    assert_eq!(years[0]["approved"], 1);
    assert_eq!(years[0]["total"], 2);
    assert_eq!(years[0]["percentage"], 50.0);
    assert_eq!(years[0]["display"], "50%");

    assert!(years[1]["percentage"].is_null());
    assert_eq!(years[1]["display"], "no data");
    assert_eq!(years[2]["display"], "100%");

    assert_eq!(body["general_average"], 7.5);
    assert_eq!(body["general_average_display"], "7.5");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_dashboard_without_subjects(pool: PgPool) {
    let user = create_test_user(&pool).await;

    let response = test_app(pool)
        .oneshot(get_request("/api/dashboard", Some(&user.token)))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["years"].as_array().unwrap().len(), 0);
    assert!(body["general_average"].is_null());
    assert_eq!(body["general_average_display"], "no data");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_calendar_lists_upcoming_evaluations(pool: PgPool) {
    let user = create_test_user(&pool).await;
    let other = create_test_user(&pool).await;
    let algebra = create_test_subject(&pool, user.id, 1, "Algebra", "in_progress", None).await;
    let foreign = create_test_subject(&pool, other.id, 1, "Quimica", "in_progress", None).await;

    let today = Local::now().date_naive();
    let dates = [
        (algebra, Some(today - Duration::days(3))),
        (algebra, Some(today + Duration::days(20))),
        (algebra, Some(today + Duration::days(2))),
        (algebra, None),
        (foreign, Some(today + Duration::days(1))),
    ];
    for (subject_id, date) in dates {
        sqlx::query("INSERT INTO evaluations (subject_id, date) VALUES ($1, $2)")
            .bind(subject_id)
            .bind(date)
            .execute(&pool)
            .await
            .unwrap();
    }

    let app = test_app(pool);

    let response = app
        .clone()
        .oneshot(get_request("/api/dashboard/calendar", Some(&user.token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let days: Vec<i64> = body["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["days_until"].as_i64().unwrap())
        .collect();
    assert_eq!(days, [2, 20]);
    assert!(body["window_days"].is_null());

    let response = app
        .oneshot(get_request(
            "/api/dashboard/calendar?days=7",
            Some(&user.token),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["entries"].as_array().unwrap().len(), 1);
    assert_eq!(body["entries"][0]["subject_name"], "Algebra");
    assert_eq!(body["window_days"], 7);
}
