use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;

use carrera_core::AppError;
use carrera_models::ids::UserId;

use super::model::{ProfileResponse, UpdateProfileDto};
use crate::modules::catalog::service::CatalogService;

pub struct ProfileService;

impl ProfileService {
    /// Returns the user's profile, creating an empty one on first access.
    #[instrument(skip(db))]
    pub async fn get_profile(db: &PgPool, user_id: UserId) -> Result<ProfileResponse, AppError> {
        sqlx::query("INSERT INTO profiles (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(db)
            .await?;

        sqlx::query_as::<_, ProfileResponse>(
            r#"SELECT u.id AS user_id, u.username, u.email,
                      p.faculty_id, f.name AS faculty_name,
                      p.career_id, c.name AS career_name
               FROM users u
               JOIN profiles p ON p.user_id = u.id
               LEFT JOIN faculties f ON f.id = p.faculty_id
               LEFT JOIN careers c ON c.id = p.career_id
               WHERE u.id = $1"#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    #[instrument(skip(db))]
    pub async fn update_profile(
        db: &PgPool,
        user_id: UserId,
        dto: UpdateProfileDto,
    ) -> Result<ProfileResponse, AppError> {
        match (dto.faculty_id, dto.career_id) {
            (Some(faculty_id), Some(career_id)) => {
                CatalogService::ensure_career_in_faculty(db, faculty_id, career_id).await?
            }
            (Some(faculty_id), None) => CatalogService::ensure_faculty_exists(db, faculty_id).await?,
            (None, Some(_)) => {
                return Err(AppError::bad_request(anyhow!(
                    "A career requires its faculty to be selected"
                )));
            }
            (None, None) => {}
        }

        let mut tx = db.begin().await?;

        if let Some(email) = &dto.email {
            sqlx::query("UPDATE users SET email = $1, updated_at = NOW() WHERE id = $2")
                .bind(email.trim().to_lowercase())
                .bind(user_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    if let sqlx::Error::Database(db_err) = &e
                        && db_err.is_unique_violation()
                    {
                        return AppError::bad_request(anyhow!("Email already in use"));
                    }
                    AppError::from(e)
                })?;
        }

        sqlx::query(
            r#"INSERT INTO profiles (user_id, faculty_id, career_id, updated_at)
               VALUES ($1, $2, $3, NOW())
               ON CONFLICT (user_id) DO UPDATE
               SET faculty_id = EXCLUDED.faculty_id,
                   career_id = EXCLUDED.career_id,
                   updated_at = NOW()"#,
        )
        .bind(user_id)
        .bind(dto.faculty_id)
        .bind(dto.career_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Self::get_profile(db, user_id).await
    }
}
