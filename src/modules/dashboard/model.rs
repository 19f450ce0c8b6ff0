pub use carrera_models::dashboard::*;

use carrera_models::evaluations::{ContentKind, EvaluationKind};
use carrera_models::ids::{EvaluationId, SubjectId};
use chrono::NaiveDate;
use sqlx::FromRow;

/// An evaluation joined with its subject, as read for the calendar.
#[derive(Debug, Clone, FromRow)]
pub struct CalendarRow {
    pub evaluation_id: EvaluationId,
    pub subject_id: SubjectId,
    pub subject_name: String,
    pub kind: EvaluationKind,
    pub content: ContentKind,
    pub date: Option<NaiveDate>,
    pub grade: Option<f64>,
    pub notes: String,
}
