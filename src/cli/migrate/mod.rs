//! Migrate command - applies storage migrations and exits

use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::observability::{TracingConfig, init_tracing};
use crate::infrastructure::storage::{PostgresMigrator, run_storage_migrations};

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_tracing(&config.logging, &TracingConfig::default());

    let pool = crate::connect_postgres(&config.storage).await?;
    let applied = run_storage_migrations(&pool).await?;
    let version = PostgresMigrator::new(pool.clone()).current_version().await?;

    info!(applied, version = ?version, "Migrations complete");
    pool.close().await;

    Ok(())
}
