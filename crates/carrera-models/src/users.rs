//! User accounts and authentication DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{CareerId, FacultyId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Login lookup row, including the password hash.
#[derive(Debug, Clone, FromRow)]
pub struct UserCredentials {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Sign-up form. The career must belong to the chosen faculty.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 150))]
    #[schema(example = "jdoe")]
    pub username: String,
    #[validate(email)]
    #[schema(example = "jdoe@example.com")]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub faculty_id: FacultyId,
    pub career_id: CareerId,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Username or email
    #[validate(length(min = 1))]
    #[schema(example = "jdoe")]
    pub login: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    /// Seconds until the access token expires
    pub expires_in: i64,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_validation() {
        let valid: RegisterRequest = serde_urlencoded::from_str(
            "username=jdoe&email=jdoe%40example.com&password=password123\
             &faculty_id=00000000-0000-0000-0000-000000000001\
             &career_id=00000000-0000-0000-0000-000000000002",
        )
        .unwrap();
        assert!(valid.validate().is_ok());

        let short_password = RegisterRequest {
            password: "short".into(),
            ..valid.clone()
        };
        assert!(short_password.validate().is_err());

        let bad_email = RegisterRequest {
            email: "not-an-email".into(),
            ..valid
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_register_requires_faculty_and_career() {
        assert!(
            serde_urlencoded::from_str::<RegisterRequest>(
                "username=jdoe&email=jdoe%40example.com&password=password123"
            )
            .is_err()
        );
    }

    #[test]
    fn test_login_validation() {
        let empty = LoginRequest {
            login: String::new(),
            password: "x".into(),
        };
        assert!(empty.validate().is_err());
    }
}
