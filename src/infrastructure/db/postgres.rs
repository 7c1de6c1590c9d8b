use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;
use std::time::Duration;

use crate::{db::connection::{ConnectionCache, Connector}, settings::AppConfig};

/// Connection cache handing out the shared Postgres pool.
pub type PgConnections = ConnectionCache<PgConnector>;

#[derive(Clone)]
pub struct PgConnector {
    database_url: String,
    max_connections: u32,
    run_migrations: bool,
}

impl From<&AppConfig> for PgConnector {
    fn from(config: &AppConfig) -> Self {
        PgConnector {
            database_url: config.database_url.clone(),
            max_connections: config.database_max_connections,
            run_migrations: config.run_migrations,
        }
    }
}

#[async_trait]
impl Connector for PgConnector {
    type Handle = PgPool;
    type Error = sqlx::Error;

    async fn connect(&self) -> Result<PgPool, sqlx::Error> {
        let pool = create_pool(&self.database_url, self.max_connections).await?;

        if self.run_migrations {
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;
            info!("Database migrations applied.");
        }

        Ok(pool)
    }

    async fn close(&self, pool: &PgPool) {
        pool.close().await;
    }
}

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;

    info!("Database connection established.");
    Ok(pool)
}
