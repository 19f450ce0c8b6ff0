use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use carrera_auth::create_access_token;
use carrera_core::{AppError, hash_password, verify_password};

use super::model::{LoginRequest, LoginResponse, RegisterRequest, User, UserCredentials};
use crate::config::JwtConfig;
use crate::metrics::{track_login, track_user_registered};
use crate::modules::catalog::service::CatalogService;

pub struct AuthService;

impl AuthService {
    /// Creates the user and its profile in one transaction.
    #[instrument(skip(db, dto), fields(username = %dto.username))]
    pub async fn register_user(db: &PgPool, dto: RegisterRequest) -> Result<User, AppError> {
        CatalogService::ensure_career_in_faculty(db, dto.faculty_id, dto.career_id).await?;

        let hashed_password = hash_password(&dto.password)?;
        let mut tx = db.begin().await?;

        let user = sqlx::query_as::<_, User>(
            r#"INSERT INTO users (username, email, password)
               VALUES ($1, $2, $3)
               RETURNING id, username, email, created_at, updated_at"#,
        )
        .bind(dto.username.trim())
        .bind(dto.email.trim().to_lowercase())
        .bind(&hashed_password)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow!("Username or email already exists"));
            }
            AppError::from(e)
        })?;

        sqlx::query("INSERT INTO profiles (user_id, faculty_id, career_id) VALUES ($1, $2, $3)")
            .bind(user.id)
            .bind(dto.faculty_id)
            .bind(dto.career_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        track_user_registered();
        info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    #[instrument(skip(db, dto, jwt_config), fields(login = %dto.login))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let login = dto.login.trim();

        let credentials = sqlx::query_as::<_, UserCredentials>(
            r#"SELECT id, username, email, password FROM users
               WHERE username = $1 OR email = lower($1)"#,
        )
        .bind(login)
        .fetch_optional(db)
        .await?;

        let Some(credentials) = credentials else {
            track_login(false);
            warn!("Login attempt for unknown user");
            return Err(AppError::unauthorized("Invalid username or password"));
        };

        if !verify_password(&dto.password, &credentials.password)? {
            track_login(false);
            warn!(user_id = %credentials.id, "Login attempt with wrong password");
            return Err(AppError::unauthorized("Invalid username or password"));
        }

        let access_token = create_access_token(
            credentials.id.into_inner(),
            &credentials.username,
            &credentials.email,
            jwt_config,
        )?;

        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(credentials.id)
        .fetch_one(db)
        .await?;

        track_login(true);

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt_config.access_token_expiry,
            user,
        })
    }
}
