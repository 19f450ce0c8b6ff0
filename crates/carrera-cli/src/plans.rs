use carrera_models::imports::{ImportOptions, ImportSummary, parse_plan};
use sqlx::PgPool;

use crate::accounts::find_user_id;

/// Imports a plan file for `username` with the same rules as the upload endpoint.
pub async fn import_plan_file(
    pool: &PgPool,
    username: &str,
    input: &[u8],
    options: &ImportOptions,
) -> anyhow::Result<ImportSummary> {
    let owner_id = find_user_id(pool, username).await?;
    let plan = parse_plan(input, options.header);
    let summary = carrera_db::plans::store_plan(pool, owner_id, &plan, options).await?;
    Ok(summary)
}

/// One line per row error, `line N: message`.
pub fn format_row_errors(summary: &ImportSummary) -> Vec<String> {
    summary
        .errors
        .iter()
        .map(|e| format!("line {}: {}", e.line, e.message))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use carrera_config::ImportMode;
    use carrera_models::imports::RowError;

    #[test]
    fn test_format_row_errors() {
        let summary = ImportSummary {
            imported: 1,
            skipped_duplicates: 0,
            header_skipped: false,
            errors: vec![RowError {
                line: 3,
                message: "Year must be a positive integer".to_string(),
            }],
            committed: true,
            mode: ImportMode::BestEffort,
        };

        assert_eq!(
            format_row_errors(&summary),
            ["line 3: Year must be a positive integer"]
        );
    }
}
