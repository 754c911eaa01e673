// PostgreSQL pool

use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::info;

use backend_domain::DbConfig;

use crate::config::parse_ssl_mode;

pub fn connect_options(config: &DbConfig) -> Result<PgConnectOptions> {
    let mut options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.database)
        .username(&config.user)
        .ssl_mode(parse_ssl_mode(&config.ssl_mode)?);
    if let Some(password) = &config.password {
        options = options.password(password);
    }
    Ok(options)
}

pub async fn create_pool(config: &DbConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .connect_with(connect_options(config)?)
        .await
        .with_context(|| {
            format!(
                "failed to connect to postgres at {}:{}/{}",
                config.host, config.port, config.database
            )
        })?;
    info!(
        host = %config.host,
        database = %config.database,
        ssl_mode = %config.ssl_mode,
        "connected to the database"
    );
    Ok(pool)
}
