//! Faculty and career reference data.
//!
//! The catalog is seeded by administrators and only read by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{CareerId, FacultyId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Faculty {
    pub id: FacultyId,
    pub name: String,
    pub acronym: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Career {
    pub id: CareerId,
    pub faculty_id: FacultyId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A faculty with its careers, for populating faculty/career selectors.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FacultyWithCareers {
    #[serde(flatten)]
    pub faculty: Faculty,
    pub careers: Vec<Career>,
}

impl FacultyWithCareers {
    /// Groups careers under their faculty, keeping the input order of both.
    pub fn group(faculties: Vec<Faculty>, careers: Vec<Career>) -> Vec<Self> {
        let mut grouped: Vec<Self> = faculties
            .into_iter()
            .map(|faculty| Self {
                faculty,
                careers: Vec::new(),
            })
            .collect();

        for career in careers {
            if let Some(entry) = grouped
                .iter_mut()
                .find(|entry| entry.faculty.id == career.faculty_id)
            {
                entry.careers.push(career);
            }
        }

        grouped
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFacultyDto {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 20))]
    pub acronym: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCareerDto {
    pub faculty_id: FacultyId,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
}

/// One line of a catalog seed file: `faculty,acronym,career`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogSeedRow {
    pub faculty: String,
    #[serde(default)]
    pub acronym: Option<String>,
    pub career: String,
}

/// Reads a headerless `faculty,acronym,career` file. Blank acronyms are `None`.
pub fn parse_catalog_seed(input: &[u8]) -> Result<Vec<CatalogSeedRow>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut rows = Vec::new();
    for record in reader.deserialize::<CatalogSeedRow>() {
        let mut row = record?;
        if row.acronym.as_deref().is_some_and(str::is_empty) {
            row.acronym = None;
        }
        rows.push(row);
    }
    Ok(rows)
}
