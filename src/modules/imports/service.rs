use sqlx::PgPool;
use tracing::instrument;

use carrera_core::AppError;
use carrera_db::plans::store_plan;
use carrera_models::ids::UserId;

use super::model::{ImportOptions, ImportSummary, parse_plan};
use crate::metrics::track_plan_import;

pub struct ImportService;

impl ImportService {
    #[instrument(skip(db, input), fields(bytes = input.len()))]
    pub async fn import_plan(
        db: &PgPool,
        owner_id: UserId,
        input: &[u8],
        options: ImportOptions,
    ) -> Result<ImportSummary, AppError> {
        let plan = parse_plan(input, options.header);
        let summary = store_plan(db, owner_id, &plan, &options).await?;

        track_plan_import(summary.imported, summary.errors.len(), summary.committed);

        Ok(summary)
    }
}
