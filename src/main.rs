use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

use carrera::config::ServerConfig;
use carrera::logging::init_tracing;
use carrera::metrics::{init_metrics, metrics_app};
use carrera::router::init_router;
use carrera::state::init_app_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_tracing().context("Failed to initialize logging")?;
    let metrics_handle = init_metrics().context("Failed to install Prometheus recorder")?;

    let state = init_app_state()
        .await
        .context("Failed to connect to the database")?;
    carrera_db::run_migrations(&state.db)
        .await
        .context("Failed to run migrations")?;

    let mut app = init_router(state);
    if let Some(handle) = metrics_handle {
        app = app.merge(metrics_app(handle));
    }

    let server_config = ServerConfig::from_env();
    let listener = tokio::net::TcpListener::bind(&server_config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", server_config.addr))?;

    info!(addr = %server_config.addr, "Server running");
    info!("Swagger UI available at /swagger-ui, Scalar at /scalar");

    axum::serve(listener, app).await?;
    Ok(())
}
