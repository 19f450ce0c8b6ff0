use carrera_auth::{create_access_token, verify_token};
use carrera_config::JwtConfig;
use uuid::Uuid;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

#[test]
fn test_create_access_token_success() {
    let jwt_config = get_test_jwt_config();
    let token =
        create_access_token(Uuid::new_v4(), "ana", "ana@example.com", &jwt_config).unwrap();
    assert!(!token.is_empty());
    assert_eq!(token.split('.').count(), 3);
}

#[test]
fn test_verify_token_success() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();

    let token = create_access_token(user_id, "ana", "ana@example.com", &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.username, "ana");
    assert_eq!(claims.email, "ana@example.com");
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[test]
fn test_verify_token_invalid() {
    let jwt_config = get_test_jwt_config();
    assert!(verify_token("invalid.token.here", &jwt_config).is_err());
}

#[test]
fn test_verify_token_wrong_secret() {
    let jwt_config = get_test_jwt_config();
    let token =
        create_access_token(Uuid::new_v4(), "ana", "ana@example.com", &jwt_config).unwrap();

    let other = JwtConfig {
        secret: "a_different_secret".to_string(),
        ..jwt_config
    };
    let err = verify_token(&token, &other).unwrap_err();
    assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
}

#[test]
fn test_verify_token_expired() {
    let jwt_config = JwtConfig {
        access_token_expiry: -3600,
        ..get_test_jwt_config()
    };
    let token =
        create_access_token(Uuid::new_v4(), "ana", "ana@example.com", &jwt_config).unwrap();

    assert!(verify_token(&token, &jwt_config).is_err());
}
