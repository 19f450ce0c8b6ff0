use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;

use carrera_core::AppError;
use carrera_models::ids::{CareerId, FacultyId};

use super::model::{Career, Faculty, FacultyWithCareers};

/// Read-through access to the faculty/career catalog.
pub struct CatalogService;

impl CatalogService {
    #[instrument(skip(db))]
    pub async fn list_faculties_with_careers(
        db: &PgPool,
    ) -> Result<Vec<FacultyWithCareers>, AppError> {
        let faculties = sqlx::query_as::<_, Faculty>(
            "SELECT id, name, acronym, created_at FROM faculties ORDER BY name",
        )
        .fetch_all(db)
        .await?;

        let careers = sqlx::query_as::<_, Career>(
            "SELECT id, faculty_id, name, created_at FROM careers ORDER BY name",
        )
        .fetch_all(db)
        .await?;

        Ok(FacultyWithCareers::group(faculties, careers))
    }

    #[instrument(skip(db))]
    pub async fn list_careers(db: &PgPool, faculty_id: FacultyId) -> Result<Vec<Career>, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM faculties WHERE id = $1)")
                .bind(faculty_id)
                .fetch_one(db)
                .await?;

        if !exists {
            return Err(AppError::not_found(anyhow!("Faculty not found")));
        }

        let careers = sqlx::query_as::<_, Career>(
            r#"SELECT id, faculty_id, name, created_at FROM careers
               WHERE faculty_id = $1
               ORDER BY name"#,
        )
        .bind(faculty_id)
        .fetch_all(db)
        .await?;

        Ok(careers)
    }

    /// Fails with 400 unless the career exists and belongs to the faculty.
    #[instrument(skip(db))]
    pub async fn ensure_career_in_faculty(
        db: &PgPool,
        faculty_id: FacultyId,
        career_id: CareerId,
    ) -> Result<(), AppError> {
        let career_faculty: Option<FacultyId> =
            sqlx::query_scalar("SELECT faculty_id FROM careers WHERE id = $1")
                .bind(career_id)
                .fetch_optional(db)
                .await?;

        match career_faculty {
            None => Err(AppError::bad_request(anyhow!("Career not found"))),
            Some(owner) if owner != faculty_id => Err(AppError::bad_request(anyhow!(
                "Career does not belong to the selected faculty"
            ))),
            Some(_) => Ok(()),
        }
    }

    #[instrument(skip(db))]
    pub async fn ensure_faculty_exists(db: &PgPool, faculty_id: FacultyId) -> Result<(), AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM faculties WHERE id = $1)")
                .bind(faculty_id)
                .fetch_one(db)
                .await?;

        if exists {
            Ok(())
        } else {
            Err(AppError::bad_request(anyhow!("Faculty not found")))
        }
    }
}
