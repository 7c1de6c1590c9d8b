use async_trait::async_trait;

use crate::{
    entities::{session::Role, user::{User, UserInsert, UserRow}},
    errors::AppError,
    repositories::sqlx_repo::{SqlxRepo, SqlxUserRepo},
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;
    async fn count_users(&self) -> Result<i64, AppError>;
    async fn list_users(&self) -> Result<Vec<User>, AppError>;
    /// Inserts the user when unknown, refreshes profile fields otherwise.
    /// The stored role is never overwritten.
    async fn upsert_user(&self, user: &UserInsert) -> Result<User, AppError>;
    async fn update_role(&self, id: &str, role: Role) -> Result<User, AppError>;
}

impl SqlxUserRepo {
    pub fn new(repo: SqlxRepo) -> Self {
        SqlxUserRepo { repo }
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        let pool = self.repo.pool().await?;

        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn count_users(&self) -> Result<i64, AppError> {
        let pool = self.repo.pool().await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await?;

        Ok(count)
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let pool = self.repo.pool().await?;

        let rows = sqlx::query_as::<_, UserRow>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&pool)
            .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn upsert_user(&self, user: &UserInsert) -> Result<User, AppError> {
        let pool = self.repo.pool().await?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, name, email, image, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            ON CONFLICT (id) DO UPDATE SET
                name = COALESCE(EXCLUDED.name, users.name),
                email = COALESCE(EXCLUDED.email, users.email),
                image = COALESCE(EXCLUDED.image, users.image),
                updated_at = NOW()
            RETURNING *
            "#
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.image)
        .bind(user.role.as_str())
        .fetch_one(&pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::Conflict("Email already belongs to another user".to_string())
            }
            _ => AppError::from(e),
        })?;

        User::try_from(row)
    }

    async fn update_role(&self, id: &str, role: Role) -> Result<User, AppError> {
        let pool = self.repo.pool().await?;

        let row = sqlx::query_as::<_, UserRow>(
            "UPDATE users SET role = $2, updated_at = NOW() WHERE id = $1 RETURNING *"
        )
        .bind(id)
        .bind(role.as_str())
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        User::try_from(row)
    }
}
