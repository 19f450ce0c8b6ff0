use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::model::{ErrorResponse, LoginRequest, LoginResponse, RegisterRequest, User};
use crate::modules::catalog::model::{Career, Faculty, FacultyWithCareers};
use crate::modules::dashboard::model::{
    CalendarEntry, CalendarResponse, DashboardResponse, YearProgress, YearProgressView,
};
use crate::modules::evaluations::model::{ContentKind, Evaluation, EvaluationFormDto, EvaluationKind};
use crate::modules::imports::controller::PlanUploadForm;
use crate::modules::imports::model::{ImportSummary, RowError};
use crate::modules::prerequisites::model::{PrerequisiteFormDto, PrerequisiteLinks, SubjectRef};
use crate::modules::profiles::model::{ProfileResponse, UpdateProfileDto};
use crate::modules::subjects::model::{
    CreateSubjectDto, Duration as SubjectDuration, Subject, SubjectDetail, SubjectStatus, UpdateSubjectDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::catalog::controller::get_faculties,
        crate::modules::catalog::controller::get_faculty_careers,
        crate::modules::profiles::controller::get_profile,
        crate::modules::profiles::controller::update_profile,
        crate::modules::subjects::controller::get_subjects,
        crate::modules::subjects::controller::create_subject,
        crate::modules::subjects::controller::get_subject,
        crate::modules::subjects::controller::update_subject,
        crate::modules::subjects::controller::delete_subject,
        crate::modules::imports::controller::import_plan,
        crate::modules::prerequisites::controller::get_prerequisites,
        crate::modules::prerequisites::controller::add_prerequisite,
        crate::modules::prerequisites::controller::remove_prerequisite,
        crate::modules::evaluations::controller::create_evaluation,
        crate::modules::evaluations::controller::update_evaluation,
        crate::modules::evaluations::controller::delete_evaluation,
        crate::modules::dashboard::controller::get_dashboard,
        crate::modules::dashboard::controller::get_calendar,
    ),
    components(
        schemas(
            ErrorResponse,
            User,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            Faculty,
            Career,
            FacultyWithCareers,
            ProfileResponse,
            UpdateProfileDto,
            Subject,
            SubjectDetail,
            SubjectStatus,
            SubjectDuration,
            CreateSubjectDto,
            UpdateSubjectDto,
            SubjectRef,
            PrerequisiteFormDto,
            PrerequisiteLinks,
            Evaluation,
            EvaluationKind,
            ContentKind,
            EvaluationFormDto,
            PlanUploadForm,
            ImportSummary,
            RowError,
            YearProgress,
            YearProgressView,
            CalendarEntry,
            CalendarResponse,
            DashboardResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and login"),
        (name = "Catalog", description = "Faculty and career reference data"),
        (name = "Profile", description = "Faculty and career of the current user"),
        (name = "Subjects", description = "Study plan subjects and CSV import"),
        (name = "Evaluations", description = "Exams and assignments of a subject"),
        (name = "Dashboard", description = "Progress summary and evaluation calendar")
    ),
    info(
        title = "Carrera API",
        version = "0.1.0",
        description = "Track university subjects, grades and upcoming evaluations.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
