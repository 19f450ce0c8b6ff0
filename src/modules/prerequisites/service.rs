use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument};

use carrera_core::AppError;
use carrera_models::ids::{SubjectId, UserId};

use super::model::{PrerequisiteLinks, SubjectRef, would_create_cycle};
use crate::modules::subjects::service::SubjectService;

pub struct PrerequisiteService;

impl PrerequisiteService {
    /// Both directions of the prerequisite relation for one subject.
    pub async fn links(
        db: &PgPool,
        subject_id: SubjectId,
    ) -> Result<PrerequisiteLinks, AppError> {
        let prerequisites = sqlx::query_as::<_, SubjectRef>(
            r#"SELECT s.id, s.name, s.year, s.status
               FROM subject_prerequisites sp
               JOIN subjects s ON s.id = sp.prerequisite_id
               WHERE sp.subject_id = $1
               ORDER BY s.year, s.name"#,
        )
        .bind(subject_id)
        .fetch_all(db)
        .await?;

        let required_by = sqlx::query_as::<_, SubjectRef>(
            r#"SELECT s.id, s.name, s.year, s.status
               FROM subject_prerequisites sp
               JOIN subjects s ON s.id = sp.subject_id
               WHERE sp.prerequisite_id = $1
               ORDER BY s.year, s.name"#,
        )
        .bind(subject_id)
        .fetch_all(db)
        .await?;

        Ok(PrerequisiteLinks {
            prerequisites,
            required_by,
        })
    }

    #[instrument(skip(db))]
    pub async fn list_prerequisites(
        db: &PgPool,
        owner_id: UserId,
        subject_id: SubjectId,
    ) -> Result<PrerequisiteLinks, AppError> {
        SubjectService::find_owned(db, owner_id, subject_id).await?;
        Self::links(db, subject_id).await
    }

    /// Links `prerequisite_id` as a prerequisite of `subject_id`.
    ///
    /// Both subjects must belong to the user. Linking an existing pair is a
    /// no-op and a link that would close a cycle is rejected with 422.
    #[instrument(skip(db))]
    pub async fn add_prerequisite(
        db: &PgPool,
        owner_id: UserId,
        subject_id: SubjectId,
        prerequisite_id: SubjectId,
    ) -> Result<PrerequisiteLinks, AppError> {
        SubjectService::find_owned(db, owner_id, subject_id).await?;
        SubjectService::find_owned(db, owner_id, prerequisite_id).await?;

        let mut tx = db.begin().await?;

        // Serializes prerequisite edits of one user so the cycle check stays valid.
        sqlx::query("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;

        let edges = sqlx::query_as::<_, (SubjectId, SubjectId)>(
            r#"SELECT sp.subject_id, sp.prerequisite_id
               FROM subject_prerequisites sp
               JOIN subjects s ON s.id = sp.subject_id
               WHERE s.owner_id = $1"#,
        )
        .bind(owner_id)
        .fetch_all(&mut *tx)
        .await?;

        if would_create_cycle(&edges, subject_id, prerequisite_id) {
            return Err(AppError::unprocessable(anyhow!(
                "A subject cannot depend on itself, directly or through other prerequisites"
            )));
        }

        sqlx::query(
            "INSERT INTO subject_prerequisites (subject_id, prerequisite_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(subject_id)
        .bind(prerequisite_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(%subject_id, %prerequisite_id, "Prerequisite linked");

        Self::links(db, subject_id).await
    }

    #[instrument(skip(db))]
    pub async fn remove_prerequisite(
        db: &PgPool,
        owner_id: UserId,
        subject_id: SubjectId,
        prerequisite_id: SubjectId,
    ) -> Result<(), AppError> {
        SubjectService::find_owned(db, owner_id, subject_id).await?;

        let result = sqlx::query(
            "DELETE FROM subject_prerequisites WHERE subject_id = $1 AND prerequisite_id = $2",
        )
        .bind(subject_id)
        .bind(prerequisite_id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Prerequisite not found")));
        }
        Ok(())
    }
}
