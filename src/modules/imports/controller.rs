use anyhow::anyhow;
use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
};
use tracing::{instrument, warn};
use utoipa::ToSchema;

use carrera_core::AppError;

use super::model::{ImportOptions, ImportSummary};
use super::service::ImportService;
use crate::config::{DuplicatePolicy, HeaderPolicy, ImportConfig, ImportMode};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Multipart body of a plan upload.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct PlanUploadForm {
    /// CSV file with `year,duration,name` rows
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
    /// `auto`, `always` or `never`
    header: Option<String>,
    /// `append` or `skip`
    on_duplicate: Option<String>,
    /// `best_effort` or `atomic`
    mode: Option<String>,
}

/// Import a CSV study plan
///
/// Each valid row becomes a `not_started` subject. Invalid rows are reported
/// with their line number.
#[utoipa::path(
    post,
    path = "/api/subjects/import",
    request_body(content = PlanUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Import committed", body = ImportSummary),
        (status = 400, description = "Missing file, non-CSV file or unknown policy"),
        (status = 401, description = "Unauthorized"),
        (status = 413, description = "File too large"),
        (status = 422, description = "Atomic import rolled back because of row errors", body = ImportSummary)
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, multipart))]
pub async fn import_plan(
    State(state): State<AppState>,
    auth_user: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ImportSummary>), AppError> {
    let user_id = auth_user.user_id()?;
    let (input, options) = read_upload(&mut multipart, &state.import_config).await?;

    let summary = ImportService::import_plan(&state.db, user_id, &input, options).await?;

    let status = if summary.committed {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    Ok((status, Json(summary)))
}

async fn read_upload(
    multipart: &mut Multipart,
    config: &ImportConfig,
) -> Result<(Vec<u8>, ImportOptions), AppError> {
    let mut options = ImportOptions::from(config);
    let mut file = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                if !is_csv_filename(&filename) {
                    warn!(filename = %filename, "Rejected non-CSV upload");
                    return Err(AppError::bad_request(anyhow!(
                        "Only .csv files can be imported"
                    )));
                }

                let bytes = field.bytes().await.map_err(multipart_error)?;
                if bytes.len() > config.max_bytes {
                    return Err(AppError::new(
                        StatusCode::PAYLOAD_TOO_LARGE,
                        anyhow!("File exceeds the {} byte limit", config.max_bytes),
                    ));
                }
                file = Some(bytes.to_vec());
            }
            "header" | "on_duplicate" | "mode" => {
                let value = field.text().await.map_err(multipart_error)?;
                apply_override(&mut options, &name, &value)?;
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| {
        AppError::bad_request(anyhow!("A CSV file is required in the 'file' field"))
    })?;

    Ok((file, options))
}

fn multipart_error(err: MultipartError) -> AppError {
    AppError::new(err.status(), anyhow!(err.body_text()))
}

fn is_csv_filename(filename: &str) -> bool {
    filename.to_ascii_lowercase().ends_with(".csv")
}

/// Applies one per-upload policy part. Blank values keep the configured policy.
fn apply_override(options: &mut ImportOptions, part: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Ok(());
    }

    match part {
        "header" => options.header = value.parse::<HeaderPolicy>().map_err(AppError::bad_request)?,
        "on_duplicate" => {
            options.on_duplicate = value
                .parse::<DuplicatePolicy>()
                .map_err(AppError::bad_request)?
        }
        "mode" => options.mode = value.parse::<ImportMode>().map_err(AppError::bad_request)?,
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_extension_is_case_insensitive() {
        assert!(is_csv_filename("plan.csv"));
        assert!(is_csv_filename("PLAN.CSV"));
        assert!(!is_csv_filename("plan.xlsx"));
        assert!(!is_csv_filename("plan.csv.txt"));
        assert!(!is_csv_filename(""));
    }

    #[test]
    fn test_overrides() {
        let mut options = ImportOptions::default();

        apply_override(&mut options, "header", "never").unwrap();
        apply_override(&mut options, "on_duplicate", "skip").unwrap();
        apply_override(&mut options, "mode", "atomic").unwrap();

        assert_eq!(options.header, HeaderPolicy::Never);
        assert_eq!(options.on_duplicate, DuplicatePolicy::Skip);
        assert_eq!(options.mode, ImportMode::Atomic);
    }

    #[test]
    fn test_blank_override_keeps_config() {
        let mut options = ImportOptions::default();
        apply_override(&mut options, "mode", "  ").unwrap();
        assert_eq!(options.mode, ImportMode::BestEffort);
    }

    #[test]
    fn test_unknown_override_is_bad_request() {
        let mut options = ImportOptions::default();
        let err = apply_override(&mut options, "on_duplicate", "overwrite").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Unknown duplicate policy 'overwrite'");
    }
}
