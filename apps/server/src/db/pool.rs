//! Connection pool setup.

use crate::config::DatabaseConfig;
use anyhow::Context;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::{Duration, Instant};

/// Connect a pool sized and timed from `config`.
///
/// Every connection carries a server-side `statement_timeout`; waiting for a
/// free connection is bounded by `pool_timeout_seconds`.
pub async fn create_pool(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let start = Instant::now();

    tracing::info!(
        max_connections = config.pool_max_size,
        min_connections = config.pool_min_size,
        acquire_timeout_secs = config.pool_timeout_seconds,
        statement_timeout_secs = config.statement_timeout_seconds,
        "Creating database connection pool"
    );

    let connect_options = connect_options(config)?;

    let pool = PgPoolOptions::new()
        .max_connections(config.pool_max_size)
        .min_connections(config.pool_min_size)
        .acquire_timeout(Duration::from_secs(config.pool_timeout_seconds))
        .connect_with(connect_options)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Database connection pool ready"
    );
    Ok(pool)
}

fn connect_options(config: &DatabaseConfig) -> anyhow::Result<PgConnectOptions> {
    let statement_timeout = format!("{}s", config.statement_timeout_seconds);
    Ok(PgConnectOptions::from_str(&config.url)
        .context("Invalid database URL")?
        .options([("statement_timeout", statement_timeout.as_str())]))
}
