//! # Carrera Models
//!
//! Domain models and DTOs for the Carrera API.
//!
//! # Modules
//!
//! - [`catalog`]: Faculty and career reference data
//! - [`dashboard`]: Progress and calendar response shapes
//! - [`evaluations`]: Evaluations of a subject
//! - [`ids`]: Strongly-typed identifiers
//! - [`imports`]: CSV study plan parsing
//! - [`prerequisites`]: Prerequisite links between subjects
//! - [`profiles`]: Faculty/career affiliation of a user
//! - [`subjects`]: Subjects, duration codes and the status state machine
//! - [`users`]: Accounts and login DTOs
//!
//! # Example
//!
//! ```ignore
//! use carrera_models::imports::parse_plan;
//! use carrera_config::HeaderPolicy;
//!
//! let plan = parse_plan(b"1,0,Analisis I\n", HeaderPolicy::Auto);
//! assert_eq!(plan.rows.len(), 1);
//! ```

pub mod catalog;
pub mod dashboard;
pub mod evaluations;
pub mod ids;
pub mod imports;
pub mod prerequisites;
pub mod profiles;
pub mod subjects;
pub mod users;

pub use catalog::{Career, Faculty, FacultyWithCareers};
pub use evaluations::{ContentKind, Evaluation, EvaluationFormDto, EvaluationKind};
pub use imports::{ImportOptions, ImportSummary, ParsedPlan, RowError, parse_plan};
pub use prerequisites::{PrerequisiteFormDto, PrerequisiteLinks, SubjectRef};
pub use profiles::{Profile, ProfileResponse, UpdateProfileDto};
pub use subjects::{
    CreateSubjectDto, Duration, NewSubject, Subject, SubjectDetail, SubjectStatus,
    UpdateSubjectDto,
};
pub use users::{LoginRequest, LoginResponse, RegisterRequest, User};
