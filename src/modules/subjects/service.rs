use anyhow::anyhow;
use axum::http::StatusCode;
use sqlx::PgPool;
use tracing::{info, instrument};

use carrera_core::AppError;
use carrera_models::evaluations::{Evaluation, evaluation_average};
use carrera_models::ids::{SubjectId, UserId};

use super::model::{CreateSubjectDto, Subject, SubjectDetail, UpdateSubjectDto, parse_name};
use crate::metrics::track_subject_created;
use crate::modules::prerequisites::service::PrerequisiteService;
use crate::utils::ownership::ensure_owner;

pub(crate) const SUBJECT_COLUMNS: &str = "id, owner_id, name, year, duration, status, \
     course_grade, final_grade, description, created_at, updated_at";

pub struct SubjectService;

impl SubjectService {
    #[instrument(skip(db))]
    pub async fn list_subjects(db: &PgPool, owner_id: UserId) -> Result<Vec<Subject>, AppError> {
        let subjects = sqlx::query_as::<_, Subject>(&format!(
            "SELECT {SUBJECT_COLUMNS} FROM subjects WHERE owner_id = $1 \
             ORDER BY year, duration, name"
        ))
        .bind(owner_id)
        .fetch_all(db)
        .await?;

        Ok(subjects)
    }

    #[instrument(skip(db))]
    pub async fn create_subject(
        db: &PgPool,
        owner_id: UserId,
        dto: CreateSubjectDto,
    ) -> Result<Subject, AppError> {
        let new_subject = dto.new_subject().map_err(AppError::unprocessable)?;

        let subject = sqlx::query_as::<_, Subject>(&format!(
            "INSERT INTO subjects \
             (owner_id, name, year, duration, status, course_grade, final_grade, description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {SUBJECT_COLUMNS}"
        ))
        .bind(owner_id)
        .bind(&new_subject.name)
        .bind(new_subject.year)
        .bind(new_subject.duration)
        .bind(dto.status.unwrap_or_default())
        .bind(dto.course_grade)
        .bind(dto.final_grade)
        .bind(&dto.description)
        .fetch_one(db)
        .await?;

        track_subject_created();
        info!(subject_id = %subject.id, "Subject created");

        Ok(subject)
    }

    /// Loads a subject, answering 404 for unknown ids and 403 for other users' subjects.
    #[instrument(skip(db))]
    pub async fn find_owned(
        db: &PgPool,
        owner_id: UserId,
        subject_id: SubjectId,
    ) -> Result<Subject, AppError> {
        let subject = sqlx::query_as::<_, Subject>(&format!(
            "SELECT {SUBJECT_COLUMNS} FROM subjects WHERE id = $1"
        ))
        .bind(subject_id)
        .fetch_optional(db)
        .await?;

        ensure_owner(subject.as_ref().map(|s| s.owner_id), owner_id, "Subject")?;
        subject.ok_or_else(|| AppError::not_found(anyhow!("Subject not found")))
    }

    #[instrument(skip(db))]
    pub async fn get_subject_detail(
        db: &PgPool,
        owner_id: UserId,
        subject_id: SubjectId,
    ) -> Result<SubjectDetail, AppError> {
        let subject = Self::find_owned(db, owner_id, subject_id).await?;

        let evaluations = sqlx::query_as::<_, Evaluation>(
            r#"SELECT id, subject_id, kind, content, date, grade, notes, created_at
               FROM evaluations
               WHERE subject_id = $1
               ORDER BY date NULLS LAST, kind, created_at"#,
        )
        .bind(subject_id)
        .fetch_all(db)
        .await?;

        let evaluation_average = evaluation_average(&evaluations);
        let links = PrerequisiteService::links(db, subject_id).await?;

        Ok(SubjectDetail {
            subject,
            evaluations,
            evaluation_average,
            prerequisites: links.prerequisites,
            required_by: links.required_by,
        })
    }

    /// Applies the edit form. Status changes must be allowed by the status machine.
    #[instrument(skip(db))]
    pub async fn update_subject(
        db: &PgPool,
        owner_id: UserId,
        subject_id: SubjectId,
        dto: UpdateSubjectDto,
    ) -> Result<Subject, AppError> {
        let current = Self::find_owned(db, owner_id, subject_id).await?;
        Self::apply_update(db, current, dto).await
    }

    /// Writes `dto` over `current`, checking the transition against the status
    /// that was read. Answers 409 when the stored status changed in between.
    #[instrument(skip(db, current), fields(subject_id = %current.id))]
    pub async fn apply_update(
        db: &PgPool,
        current: Subject,
        dto: UpdateSubjectDto,
    ) -> Result<Subject, AppError> {
        let status = current
            .status
            .transition_to(dto.status)
            .map_err(AppError::unprocessable)?;

        let name = match &dto.name {
            Some(name) => parse_name(name).map_err(AppError::unprocessable)?,
            None => current.name,
        };
        let description = dto.description.or(current.description);

        let subject = sqlx::query_as::<_, Subject>(&format!(
            "UPDATE subjects \
             SET name = $1, year = $2, duration = $3, status = $4, \
                 course_grade = $5, final_grade = $6, description = $7, updated_at = NOW() \
             WHERE id = $8 AND status = $9 \
             RETURNING {SUBJECT_COLUMNS}"
        ))
        .bind(&name)
        .bind(dto.year)
        .bind(dto.duration)
        .bind(status)
        .bind(dto.course_grade)
        .bind(dto.final_grade)
        .bind(&description)
        .bind(current.id)
        .bind(current.status)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            AppError::new(
                StatusCode::CONFLICT,
                anyhow!("Subject was modified concurrently, reload it and retry"),
            )
        })?;

        if status != current.status {
            info!(subject_id = %subject.id, from = %current.status, to = %status, "Subject status changed");
        }

        Ok(subject)
    }

    #[instrument(skip(db))]
    pub async fn delete_subject(
        db: &PgPool,
        owner_id: UserId,
        subject_id: SubjectId,
    ) -> Result<(), AppError> {
        Self::find_owned(db, owner_id, subject_id).await?;

        sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(subject_id)
            .execute(db)
            .await?;

        Ok(())
    }
}
