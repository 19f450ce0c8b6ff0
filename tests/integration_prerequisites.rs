#![cfg(feature = "integration-tests")]

mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_subject, create_test_user, form_request, get_request, test_app};
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_link_list_and_unlink(pool: PgPool) {
    let user = create_test_user(&pool).await;
    let algebra = create_test_subject(&pool, user.id, 1, "Algebra", "approved", Some(8.0)).await;
    let analisis = create_test_subject(&pool, user.id, 1, "Analisis I", "in_progress", None).await;
    let fisica = create_test_subject(&pool, user.id, 2, "Fisica II", "not_started", None).await;
    let app = test_app(pool);

    for prerequisite in [analisis, algebra] {
        let response = app
            .clone()
            .oneshot(form_request(
                "POST",
                &format!("/api/subjects/{fisica}/prerequisites"),
                Some(&user.token),
                &format!("prerequisite_id={prerequisite}"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Linking the same pair again leaves a single edge.
    let response = app
        .clone()
        .oneshot(form_request(
            "POST",
            &format!("/api/subjects/{fisica}/prerequisites"),
            Some(&user.token),
            &format!("prerequisite_id={algebra}"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let names: Vec<&str> = body["prerequisites"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Algebra", "Analisis I"]);
    assert_eq!(body["prerequisites"][0]["status"], "approved");

    let response = app
        .clone()
        .oneshot(get_request(
            &format!("/api/subjects/{algebra}/prerequisites"),
            Some(&user.token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["prerequisites"].as_array().unwrap().is_empty());
    assert_eq!(body["required_by"][0]["name"], "Fisica II");

    let response = app
        .clone()
        .oneshot(get_request(
            &format!("/api/subjects/{fisica}"),
            Some(&user.token),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["prerequisites"].as_array().unwrap().len(), 2);
    assert!(body["required_by"].as_array().unwrap().is_empty());

    let response = app
        .clone()
        .oneshot(form_request(
            "DELETE",
            &format!("/api/subjects/{fisica}/prerequisites/{analisis}"),
            Some(&user.token),
            "",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(form_request(
            "DELETE",
            &format!("/api/subjects/{fisica}/prerequisites/{analisis}"),
            Some(&user.token),
            "",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(get_request(
            &format!("/api/subjects/{fisica}/prerequisites"),
            Some(&user.token),
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["prerequisites"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_cycles_are_rejected(pool: PgPool) {
    let user = create_test_user(&pool).await;
    let first = create_test_subject(&pool, user.id, 1, "Algebra", "not_started", None).await;
    let second = create_test_subject(&pool, user.id, 2, "Algebra II", "not_started", None).await;
    let third = create_test_subject(&pool, user.id, 3, "Algebra III", "not_started", None).await;
    let app = test_app(pool);

    for (subject, prerequisite) in [(second, first), (third, second)] {
        let response = app
            .clone()
            .oneshot(form_request(
                "POST",
                &format!("/api/subjects/{subject}/prerequisites"),
                Some(&user.token),
                &format!("prerequisite_id={prerequisite}"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    for (subject, prerequisite) in [(first, third), (first, first)] {
        let response = app
            .clone()
            .oneshot(form_request(
                "POST",
                &format!("/api/subjects/{subject}/prerequisites"),
                Some(&user.token),
                &format!("prerequisite_id={prerequisite}"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("cannot depend on itself"));
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_prerequisites_stay_within_one_owner(pool: PgPool) {
    let owner = create_test_user(&pool).await;
    let other = create_test_user(&pool).await;
    let mine = create_test_subject(&pool, owner.id, 2, "Fisica II", "not_started", None).await;
    let theirs = create_test_subject(&pool, other.id, 1, "Fisica I", "approved", Some(7.0)).await;
    let app = test_app(pool);

    let response = app
        .clone()
        .oneshot(form_request(
            "POST",
            &format!("/api/subjects/{mine}/prerequisites"),
            Some(&owner.token),
            &format!("prerequisite_id={theirs}"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(get_request(
            &format!("/api/subjects/{mine}/prerequisites"),
            Some(&other.token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(form_request(
            "POST",
            &format!("/api/subjects/{mine}/prerequisites"),
            Some(&owner.token),
            "prerequisite_id=not-a-uuid",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
