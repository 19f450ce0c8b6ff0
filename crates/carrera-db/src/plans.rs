//! Persistence of parsed study plans.
//!
//! A whole upload is written in one transaction. In atomic mode a plan with
//! any row error is not written at all.

use carrera_config::{DuplicatePolicy, ImportMode};
use carrera_models::ids::UserId;
use carrera_models::imports::{ImportOptions, ImportSummary, ParsedPlan};
use carrera_models::subjects::NewSubject;
use sqlx::{PgConnection, PgPool};
use tracing::{info, instrument, warn};

/// Stores the valid rows of `plan` as `NotStarted` subjects owned by `owner_id`.
///
/// Existing subjects are never modified; with [`DuplicatePolicy::Skip`] a row
/// whose (year, name) already exists for the owner is counted and left out.
#[instrument(skip(pool, plan), fields(rows = plan.rows.len(), row_errors = plan.errors.len()))]
pub async fn store_plan(
    pool: &PgPool,
    owner_id: UserId,
    plan: &ParsedPlan,
    options: &ImportOptions,
) -> Result<ImportSummary, sqlx::Error> {
    let mut summary = ImportSummary {
        imported: 0,
        skipped_duplicates: 0,
        header_skipped: plan.header_skipped,
        errors: plan.errors.clone(),
        committed: false,
        mode: options.mode,
    };

    if options.mode == ImportMode::Atomic && !plan.errors.is_empty() {
        warn!("Atomic plan import rejected because of row errors");
        return Ok(summary);
    }

    let mut tx = pool.begin().await?;

    for row in &plan.rows {
        if options.on_duplicate == DuplicatePolicy::Skip
            && subject_exists(&mut tx, owner_id, &row.subject).await?
        {
            summary.skipped_duplicates += 1;
            continue;
        }

        insert_subject(&mut tx, owner_id, &row.subject).await?;
        summary.imported += 1;
    }

    tx.commit().await?;
    summary.committed = true;

    info!(
        imported = summary.imported,
        skipped_duplicates = summary.skipped_duplicates,
        "Plan import committed"
    );

    Ok(summary)
}

async fn subject_exists(
    conn: &mut PgConnection,
    owner_id: UserId,
    subject: &NewSubject,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM subjects WHERE owner_id = $1 AND year = $2 AND name = $3)",
    )
    .bind(owner_id)
    .bind(subject.year)
    .bind(&subject.name)
    .fetch_one(conn)
    .await
}

async fn insert_subject(
    conn: &mut PgConnection,
    owner_id: UserId,
    subject: &NewSubject,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO subjects (owner_id, name, year, duration) VALUES ($1, $2, $3, $4)")
        .bind(owner_id)
        .bind(&subject.name)
        .bind(subject.year)
        .bind(subject.duration)
        .execute(conn)
        .await?;
    Ok(())
}
