use sqlx::PgPool;

use crate::config::{CalendarConfig, CorsConfig, ImportConfig, JwtConfig};

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub import_config: ImportConfig,
    pub calendar_config: CalendarConfig,
}

impl AppState {
    /// Builds the state around an existing pool, reading every config from the environment.
    pub fn from_env(db: PgPool) -> Self {
        Self {
            db,
            jwt_config: JwtConfig::from_env(),
            cors_config: CorsConfig::from_env(),
            import_config: ImportConfig::from_env(),
            calendar_config: CalendarConfig::from_env(),
        }
    }
}

pub async fn init_app_state() -> Result<AppState, sqlx::Error> {
    let db = carrera_db::init_db_pool().await?;
    Ok(AppState::from_env(db))
}
