use crate::core::config::DatabaseConfig;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

/// Connection pool for the `reg_*` reference tables
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.url)
        .await
}

/// Confirm the region registry is reachable and populated.
///
/// Returns the number of provinces; the registry is maintained elsewhere, so
/// an empty table means the reference data was never loaded.
pub async fn verify_registry(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let provinces: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reg_provinces")
        .fetch_one(pool)
        .await?;

    if provinces == 0 {
        tracing::warn!("Region registry is empty: reg_provinces has no rows");
    }

    Ok(provinces)
}
