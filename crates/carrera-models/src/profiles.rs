//! Profile models: a user's faculty and career affiliation.

use carrera_core::serde::empty_string_as_none;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{CareerId, FacultyId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Profile {
    pub user_id: UserId,
    pub faculty_id: Option<FacultyId>,
    pub career_id: Option<CareerId>,
    pub updated_at: DateTime<Utc>,
}

/// Profile joined with the user and catalog names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow, ToSchema)]
pub struct ProfileResponse {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
    pub faculty_id: Option<FacultyId>,
    pub faculty_name: Option<String>,
    pub career_id: Option<CareerId>,
    pub career_name: Option<String>,
}

/// Settings form. Blank faculty or career clears it; a blank email keeps the
/// current one.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(email)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub faculty_id: Option<FacultyId>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub career_id: Option<CareerId>,
}
