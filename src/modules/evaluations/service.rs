use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument};

use carrera_core::AppError;
use carrera_models::ids::{EvaluationId, SubjectId, UserId};

use super::model::{Evaluation, EvaluationFormDto};
use crate::metrics::track_evaluation_created;
use crate::modules::subjects::service::SubjectService;
use crate::utils::ownership::ensure_owner;

const EVALUATION_COLUMNS: &str = "id, subject_id, kind, content, date, grade, notes, created_at";

pub struct EvaluationService;

impl EvaluationService {
    #[instrument(skip(db))]
    pub async fn create_evaluation(
        db: &PgPool,
        owner_id: UserId,
        subject_id: SubjectId,
        dto: EvaluationFormDto,
    ) -> Result<Evaluation, AppError> {
        SubjectService::find_owned(db, owner_id, subject_id).await?;

        let evaluation = sqlx::query_as::<_, Evaluation>(&format!(
            "INSERT INTO evaluations (subject_id, kind, content, date, grade, notes) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {EVALUATION_COLUMNS}"
        ))
        .bind(subject_id)
        .bind(dto.kind.unwrap_or_default())
        .bind(dto.content.unwrap_or_default())
        .bind(dto.date)
        .bind(dto.grade)
        .bind(dto.notes.trim())
        .fetch_one(db)
        .await?;

        track_evaluation_created();
        info!(evaluation_id = %evaluation.id, subject_id = %subject_id, "Evaluation created");

        Ok(evaluation)
    }

    /// Checks that the evaluation exists and belongs to one of the user's subjects.
    async fn ensure_owned(
        db: &PgPool,
        owner_id: UserId,
        evaluation_id: EvaluationId,
    ) -> Result<(), AppError> {
        let owner: Option<UserId> = sqlx::query_scalar(
            r#"SELECT s.owner_id FROM evaluations e
               JOIN subjects s ON s.id = e.subject_id
               WHERE e.id = $1"#,
        )
        .bind(evaluation_id)
        .fetch_optional(db)
        .await?;

        ensure_owner(owner, owner_id, "Evaluation")
    }

    /// Replaces date, grade and notes; a blank kind or content keeps the stored one.
    #[instrument(skip(db))]
    pub async fn update_evaluation(
        db: &PgPool,
        owner_id: UserId,
        evaluation_id: EvaluationId,
        dto: EvaluationFormDto,
    ) -> Result<Evaluation, AppError> {
        Self::ensure_owned(db, owner_id, evaluation_id).await?;

        sqlx::query_as::<_, Evaluation>(&format!(
            "UPDATE evaluations \
             SET kind = COALESCE($1, kind), content = COALESCE($2, content), \
                 date = $3, grade = $4, notes = $5 \
             WHERE id = $6 \
             RETURNING {EVALUATION_COLUMNS}"
        ))
        .bind(dto.kind)
        .bind(dto.content)
        .bind(dto.date)
        .bind(dto.grade)
        .bind(dto.notes.trim())
        .bind(evaluation_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Evaluation not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_evaluation(
        db: &PgPool,
        owner_id: UserId,
        evaluation_id: EvaluationId,
    ) -> Result<(), AppError> {
        Self::ensure_owned(db, owner_id, evaluation_id).await?;

        sqlx::query("DELETE FROM evaluations WHERE id = $1")
            .bind(evaluation_id)
            .execute(db)
            .await?;

        Ok(())
    }
}
