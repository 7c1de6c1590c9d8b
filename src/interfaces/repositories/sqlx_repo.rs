use std::sync::Arc;

use sqlx::PgPool;

use crate::{db::postgres::PgConnections, errors::AppError};

/// Shared by every Postgres repository; the pool is opened on first use.
#[derive(Clone)]
pub struct SqlxRepo {
    pub db: Arc<PgConnections>,
}

impl SqlxRepo {
    pub fn new(db: Arc<PgConnections>) -> Self {
        SqlxRepo { db }
    }

    pub async fn pool(&self) -> Result<PgPool, AppError> {
        self.db.get().await.map_err(|e| {
            tracing::error!("Database connection failed: {}", e);
            AppError::from(e)
        })
    }
}

#[derive(Clone)]
pub struct SqlxUserRepo {
    pub repo: SqlxRepo,
}

#[derive(Clone)]
pub struct SqlxBlogPostRepo {
    pub repo: SqlxRepo,
}

#[derive(Clone)]
pub struct SqlxLaunchWeekRepo {
    pub repo: SqlxRepo,
}

#[derive(Clone)]
pub struct SqlxDirectoryRepo {
    pub repo: SqlxRepo,
}
