//! Pool construction and per-request connection acquisition.

use crate::config::DbConfig;
use crate::error::ApiError;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::pool::PoolConnection;
use sqlx::{MySql, MySqlPool};
use std::time::Duration;

/// Build the shared pool. Connections are established lazily, so the server
/// starts even when the database is unreachable and each request fails
/// independently until it comes back.
pub fn connect(config: &DbConfig) -> MySqlPool {
    MySqlPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy_with(config.connect_options())
}

/// Check out one connection for the duration of a handler invocation. The
/// connection goes back to the pool when the guard drops, on every exit path.
pub async fn acquire(pool: &MySqlPool) -> Result<PoolConnection<MySql>, ApiError> {
    let conn = pool.acquire().await.map_err(ApiError::Connection)?;
    tracing::debug!("database connection acquired");
    Ok(conn)
}
