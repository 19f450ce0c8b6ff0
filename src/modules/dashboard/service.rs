use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::instrument;

use carrera_core::AppError;
use carrera_models::ids::UserId;

use super::calendar::{build_calendar, evaluation_years};
use super::model::{CalendarResponse, CalendarRow, DashboardResponse};
use super::progress::{average_display, general_average, round2, year_views};
use crate::modules::subjects::service::SubjectService;

pub struct DashboardService;

impl DashboardService {
    #[instrument(skip(db))]
    pub async fn get_dashboard(
        db: &PgPool,
        owner_id: UserId,
        today: NaiveDate,
        window_days: Option<u32>,
    ) -> Result<DashboardResponse, AppError> {
        let subjects = SubjectService::list_subjects(db, owner_id).await?;
        let rows = Self::calendar_rows(db, owner_id).await?;

        let general_average = general_average(&subjects).map(round2);

        Ok(DashboardResponse {
            years: year_views(&subjects),
            general_average,
            general_average_display: average_display(general_average),
            upcoming: build_calendar(rows, today, window_days),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_calendar(
        db: &PgPool,
        owner_id: UserId,
        today: NaiveDate,
        window_days: Option<u32>,
    ) -> Result<CalendarResponse, AppError> {
        let rows = Self::calendar_rows(db, owner_id).await?;
        let years = evaluation_years(&rows);

        Ok(CalendarResponse {
            entries: build_calendar(rows, today, window_days),
            years,
            window_days,
        })
    }

    async fn calendar_rows(db: &PgPool, owner_id: UserId) -> Result<Vec<CalendarRow>, AppError> {
        let rows = sqlx::query_as::<_, CalendarRow>(
            r#"SELECT e.id AS evaluation_id, s.id AS subject_id, s.name AS subject_name,
                      e.kind, e.content, e.date, e.grade, e.notes
               FROM evaluations e
               JOIN subjects s ON s.id = e.subject_id
               WHERE s.owner_id = $1 AND e.date IS NOT NULL"#,
        )
        .bind(owner_id)
        .fetch_all(db)
        .await?;

        Ok(rows)
    }
}
