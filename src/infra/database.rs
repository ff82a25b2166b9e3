//! For interacting with the database.

use super::config::DatabaseConfig;
use sqlx::{
    pool::PoolOptions,
    postgres::PgConnectOptions,
    ConnectOptions, Connection, PgPool,
};
use std::str::FromStr;
use tracing::{instrument, log::LevelFilter};

/// A common database pool type.
pub type DbPool = PgPool;

/// Builds a lazily connecting pool from the configured connection string.
pub fn init_db(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let db_options = PgConnectOptions::from_str(&config.url)?.log_statements(LevelFilter::Debug);
    let db: PgPool = PoolOptions::default()
        .acquire_timeout(config.acquire_timeout)
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .connect_lazy_with(db_options);
    Ok(db)
}

/// Applies any pending migrations from `./migrations`.
#[instrument(skip(db))]
pub async fn migrate(db: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("Running migrations");
    sqlx::migrate!().run(db).await
}

/// Checks that a connection can be acquired and answers.
#[instrument(skip(db))]
pub async fn ping(db: &DbPool) -> Result<(), sqlx::Error> {
    let mut conn = db.acquire().await?;
    conn.ping().await
}
