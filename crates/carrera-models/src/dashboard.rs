//! Dashboard and calendar response shapes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::evaluations::{ContentKind, EvaluationKind};
use crate::ids::{EvaluationId, SubjectId};
use crate::subjects::Subject;

/// Approval counts for one year of the plan.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct YearProgress {
    pub year: i32,
    pub approved: usize,
    pub total: usize,
    /// `null` when the year has no subjects
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct YearProgressView {
    #[serde(flatten)]
    pub progress: YearProgress,
    #[schema(example = "Year 1")]
    pub label: String,
    #[schema(example = "50%")]
    pub display: String,
    pub subjects: Vec<Subject>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CalendarEntry {
    pub evaluation_id: EvaluationId,
    pub subject_id: SubjectId,
    pub subject_name: String,
    pub kind: EvaluationKind,
    pub content: ContentKind,
    pub date: NaiveDate,
    pub grade: Option<f64>,
    pub notes: String,
    pub days_until: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CalendarResponse {
    pub entries: Vec<CalendarEntry>,
    /// Distinct years with at least one dated evaluation
    pub years: Vec<i32>,
    /// Lookahead in days, `null` for every future date
    pub window_days: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CalendarQuery {
    /// Only include evaluations within this many days from today
    pub days: Option<u32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub years: Vec<YearProgressView>,
    pub general_average: Option<f64>,
    #[schema(example = "7.5")]
    pub general_average_display: String,
    pub upcoming: Vec<CalendarEntry>,
}
