pub mod bootstrap;
pub mod sqlx;

use ::sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::Config;
use crate::error::Error;

/// Builds the process-wide pool. Called once from `main`; the pool is closed there on shutdown.
pub async fn connect(config: &Config) -> Result<PgPool, Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .after_connect(|_conn, _meta| {
            Box::pin(async move {
                log::info!("connected to PostgreSQL database");
                Ok(())
            })
        })
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}
