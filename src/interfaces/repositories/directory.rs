use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    entities::directory::{Directory, DirectoryRow},
    errors::AppError,
    repositories::sqlx_repo::{SqlxDirectoryRepo, SqlxRepo},
};

#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// Every stored directory document, oldest first.
    async fn list_directories(&self) -> Result<Vec<Directory>, AppError>;

    async fn create_directory(&self, id: Uuid, document: &Map<String, Value>) -> Result<Uuid, AppError>;

    async fn delete_directory(&self, id: &Uuid) -> Result<(), AppError>;

    async fn count_directories(&self) -> Result<i64, AppError>;
}

impl SqlxDirectoryRepo {
    pub fn new(repo: SqlxRepo) -> Self {
        SqlxDirectoryRepo { repo }
    }
}

#[async_trait]
impl DirectoryRepository for SqlxDirectoryRepo {
    async fn list_directories(&self) -> Result<Vec<Directory>, AppError> {
        let pool = self.repo.pool().await?;

        let rows = sqlx::query_as::<_, DirectoryRow>(
            "SELECT id, document, created_at, updated_at FROM directories ORDER BY created_at ASC"
        )
        .fetch_all(&pool)
        .await?;

        Ok(rows.into_iter().map(Directory::from).collect())
    }

    async fn create_directory(&self, id: Uuid, document: &Map<String, Value>) -> Result<Uuid, AppError> {
        let pool = self.repo.pool().await?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO directories (id, document, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            RETURNING id
            "#
        )
        .bind(id)
        .bind(Json(document))
        .fetch_one(&pool)
        .await?;

        Ok(id)
    }

    async fn delete_directory(&self, id: &Uuid) -> Result<(), AppError> {
        let pool = self.repo.pool().await?;

        let result = sqlx::query("DELETE FROM directories WHERE id = $1")
            .bind(id)
            .execute(&pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Directory not found".into()));
        }

        Ok(())
    }

    async fn count_directories(&self) -> Result<i64, AppError> {
        let pool = self.repo.pool().await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM directories")
            .fetch_one(&pool)
            .await?;

        Ok(count)
    }
}
