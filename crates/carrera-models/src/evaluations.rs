//! Evaluation domain models and DTOs.

use std::str::FromStr;

use carrera_core::serde::empty_string_as_none;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{EvaluationId, SubjectId};

/// Kind of graded event. Declaration order is the calendar tie-break order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    sqlx::Type,
    ToSchema,
)]
#[sqlx(type_name = "evaluation_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EvaluationKind {
    #[default]
    Partial,
    Makeup,
    Assignment,
    Other,
}

impl FromStr for EvaluationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "partial" => Ok(Self::Partial),
            "makeup" => Ok(Self::Makeup),
            "assignment" => Ok(Self::Assignment),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown evaluation kind '{}'", s.trim())),
        }
    }
}

/// Which part of the subject an evaluation covers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "content_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    #[default]
    Theory,
    Practice,
    TheoryAndPractice,
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "theory" => Ok(Self::Theory),
            "practice" => Ok(Self::Practice),
            "theory_and_practice" => Ok(Self::TheoryAndPractice),
            _ => Err(format!("Unknown content kind '{}'", s.trim())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Evaluation {
    pub id: EvaluationId,
    pub subject_id: SubjectId,
    pub kind: EvaluationKind,
    pub content: ContentKind,
    /// Undated evaluations never show up in the calendar
    pub date: Option<NaiveDate>,
    pub grade: Option<f64>,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// Form used both to add an evaluation and to replace one.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct EvaluationFormDto {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub kind: Option<EvaluationKind>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub content: Option<ContentKind>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[schema(value_type = Option<String>, format = "date", example = "2026-11-20")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(range(min = 1.0, max = 10.0))]
    pub grade: Option<f64>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub notes: String,
}

/// Mean grade of the graded evaluations, `None` when none has a grade.
pub fn evaluation_average(evaluations: &[Evaluation]) -> Option<f64> {
    let grades: Vec<f64> = evaluations.iter().filter_map(|e| e.grade).collect();
    if grades.is_empty() {
        return None;
    }
    Some(grades.iter().sum::<f64>() / grades.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluation(grade: Option<f64>) -> Evaluation {
        Evaluation {
            id: EvaluationId::new(),
            subject_id: SubjectId::nil(),
            kind: EvaluationKind::Partial,
            content: ContentKind::Theory,
            date: None,
            grade,
            notes: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_kind_order() {
        assert!(EvaluationKind::Partial < EvaluationKind::Makeup);
        assert!(EvaluationKind::Makeup < EvaluationKind::Assignment);
        assert!(EvaluationKind::Assignment < EvaluationKind::Other);
    }

    #[test]
    fn test_form_defaults_and_blank_fields() {
        let dto: EvaluationFormDto =
            serde_urlencoded::from_str("kind=makeup&content=&date=&grade=&notes=").unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.kind, Some(EvaluationKind::Makeup));
        assert_eq!(dto.content, None);
        assert_eq!(dto.date, None);
        assert_eq!(dto.grade, None);
        assert!(dto.notes.is_empty());
    }

    #[test]
    fn test_form_parses_date_and_grade() {
        let dto: EvaluationFormDto = serde_urlencoded::from_str(
            "kind=partial&content=theory_and_practice&date=2026-11-20&grade=8",
        )
        .unwrap();
        assert_eq!(dto.content, Some(ContentKind::TheoryAndPractice));
        assert_eq!(dto.date, NaiveDate::from_ymd_opt(2026, 11, 20));
        assert_eq!(dto.grade, Some(8.0));
    }

    #[test]
    fn test_form_validation() {
        let long_notes = EvaluationFormDto {
            kind: None,
            content: None,
            date: None,
            grade: None,
            notes: "n".repeat(101),
        };
        assert!(long_notes.validate().is_err());

        let low_grade = EvaluationFormDto {
            kind: None,
            content: None,
            date: None,
            grade: Some(0.5),
            notes: String::new(),
        };
        assert!(low_grade.validate().is_err());
    }

    #[test]
    fn test_evaluation_average() {
        assert_eq!(evaluation_average(&[]), None);
        assert_eq!(evaluation_average(&[evaluation(None)]), None);
        assert_eq!(
            evaluation_average(&[evaluation(Some(6.0)), evaluation(None), evaluation(Some(9.0))]),
            Some(7.5)
        );
    }
}
