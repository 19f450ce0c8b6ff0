//! Subject domain models and DTOs.
//!
//! A subject is one course of a student's plan. The field rules in
//! [`NewSubject::parse`] are shared by the CSV importer and the manual form,
//! so both reject exactly the same inputs.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use carrera_core::serde::{empty_string_as_none, from_trimmed_str};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::openapi::schema::{ObjectBuilder, Schema, Type};
use utoipa::openapi::RefOr;
use utoipa::{PartialSchema, ToSchema};
use validator::Validate;

use crate::evaluations::Evaluation;
use crate::ids::{SubjectId, UserId};
use crate::prerequisites::SubjectRef;

pub const MAX_NAME_LEN: usize = 200;
/// Largest plan year accepted, the range of a Postgres `SMALLINT`.
pub const MAX_YEAR: i32 = i16::MAX as i32;

/// Whether a subject spans the full academic year or a single term.
///
/// Stored as a `SMALLINT` code: `0` annual, `1` first term, `2` second term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum Duration {
    Annual = 0,
    FirstTerm = 1,
    SecondTerm = 2,
}

impl Duration {
    pub fn code(self) -> i16 {
        self as i16
    }

    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Annual),
            1 => Some(Self::FirstTerm),
            2 => Some(Self::SecondTerm),
            _ => None,
        }
    }
}

// The derive does not accept explicit discriminants, so the schema is
// written out to match the serialized names.
impl PartialSchema for Duration {
    fn schema() -> RefOr<Schema> {
        let object = ObjectBuilder::new()
            .schema_type(Type::String)
            .enum_values(Some(["annual", "first_term", "second_term"]))
            .description(Some("Forms also accept the codes `0`, `1` and `2`"))
            .build();
        RefOr::T(Schema::Object(object))
    }
}

impl ToSchema for Duration {
    fn name() -> Cow<'static, str> {
        Cow::Borrowed("Duration")
    }
}

impl FromStr for Duration {
    type Err = SubjectFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed {
            "0" | "annual" => Ok(Self::Annual),
            "1" | "first_term" => Ok(Self::FirstTerm),
            "2" | "second_term" => Ok(Self::SecondTerm),
            _ => Err(SubjectFieldError::InvalidDuration(trimmed.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        from_trimmed_str(deserializer)
    }
}

/// Progress of a subject as declared by its owner.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "subject_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SubjectStatus {
    #[default]
    NotStarted,
    InProgress,
    Approved,
    Failed,
}

impl SubjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Approved => "approved",
            Self::Failed => "failed",
        }
    }

    /// Staying in the same status is always allowed. `Approved` is terminal and
    /// `Failed` may only go back to `InProgress` for a retake.
    pub fn can_transition_to(self, next: SubjectStatus) -> bool {
        use SubjectStatus::*;

        self == next
            || matches!(
                (self, next),
                (NotStarted, InProgress)
                    | (InProgress, Approved)
                    | (InProgress, Failed)
                    | (Failed, InProgress)
            )
    }

    pub fn transition_to(self, next: SubjectStatus) -> Result<SubjectStatus, InvalidTransition> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for SubjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "not_started" => Ok(Self::NotStarted),
            "in_progress" => Ok(Self::InProgress),
            "approved" => Ok(Self::Approved),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("Unknown subject status '{}'", s.trim())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: SubjectStatus,
    pub to: SubjectStatus,
}

impl fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot change status from {} to {}", self.from, self.to)
    }
}

impl std::error::Error for InvalidTransition {}

/// Why a (year, duration, name) triple was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectFieldError {
    InvalidYear(String),
    NonPositiveYear(i64),
    YearTooLarge(i64),
    InvalidDuration(String),
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for SubjectFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidYear(raw) => write!(f, "Year '{raw}' is not an integer"),
            Self::NonPositiveYear(year) => {
                write!(f, "Year must be a positive integer, got {year}")
            }
            Self::YearTooLarge(year) => {
                write!(f, "Year must be at most {MAX_YEAR}, got {year}")
            }
            Self::InvalidDuration(raw) => {
                write!(f, "Duration '{raw}' is not one of 0, 1 or 2")
            }
            Self::EmptyName => f.write_str("Subject name must not be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Subject name has {len} characters, the maximum is {MAX_NAME_LEN}"
            ),
        }
    }
}

impl std::error::Error for SubjectFieldError {}

/// A validated subject ready to be inserted with status `NotStarted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubject {
    pub year: i32,
    pub duration: Duration,
    pub name: String,
}

impl NewSubject {
    pub fn parse(year: &str, duration: &str, name: &str) -> Result<Self, SubjectFieldError> {
        Ok(Self {
            year: parse_year(year)?,
            duration: duration.parse()?,
            name: parse_name(name)?,
        })
    }
}

pub fn parse_year(raw: &str) -> Result<i32, SubjectFieldError> {
    let raw = raw.trim();
    let year: i64 = raw
        .parse()
        .map_err(|_| SubjectFieldError::InvalidYear(raw.to_string()))?;
    if year <= 0 {
        return Err(SubjectFieldError::NonPositiveYear(year));
    }
    if year > i64::from(MAX_YEAR) {
        return Err(SubjectFieldError::YearTooLarge(year));
    }
    Ok(year as i32)
}

pub fn parse_name(raw: &str) -> Result<String, SubjectFieldError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(SubjectFieldError::EmptyName);
    }
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(SubjectFieldError::NameTooLong(len));
    }
    Ok(name.to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Subject {
    pub id: SubjectId,
    pub owner_id: UserId,
    pub name: String,
    pub year: i32,
    pub duration: Duration,
    pub status: SubjectStatus,
    pub course_grade: Option<f64>,
    pub final_grade: Option<f64>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Manual subject entry form.
///
/// `year`, `duration` and `name` arrive as raw strings and go through
/// [`NewSubject::parse`].
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSubjectDto {
    #[schema(example = "1")]
    pub year: String,
    /// `0` annual, `1` first term, `2` second term
    #[schema(example = "0")]
    pub duration: String,
    #[schema(example = "Analisis Matematico I")]
    pub name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub status: Option<SubjectStatus>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(range(min = 1.0, max = 10.0))]
    pub course_grade: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(range(min = 1.0, max = 10.0))]
    pub final_grade: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub description: Option<String>,
}

impl CreateSubjectDto {
    pub fn new_subject(&self) -> Result<NewSubject, SubjectFieldError> {
        NewSubject::parse(&self.year, &self.duration, &self.name)
    }
}

/// Edit form. Grades are replaced as submitted, so a blank grade clears it;
/// a missing name or description keeps the stored value.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateSubjectDto {
    pub status: SubjectStatus,
    #[schema(value_type = String, example = "1")]
    pub duration: Duration,
    #[serde(deserialize_with = "from_trimmed_str")]
    #[validate(range(min = 1, max = MAX_YEAR))]
    pub year: i32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(range(min = 1.0, max = 10.0))]
    pub course_grade: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(range(min = 1.0, max = 10.0))]
    pub final_grade: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectDetail {
    #[serde(flatten)]
    pub subject: Subject,
    pub evaluations: Vec<Evaluation>,
    /// Mean of the graded evaluations, `null` when none is graded
    pub evaluation_average: Option<f64>,
    /// Subjects that must be approved before this one
    pub prerequisites: Vec<SubjectRef>,
    /// Subjects that list this one as a prerequisite
    pub required_by: Vec<SubjectRef>,
}
