use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::blog_post::{BlogPost, BlogPostChanges, BlogPostInsert, BlogPostRow},
    errors::AppError,
    repositories::sqlx_repo::{SqlxBlogPostRepo, SqlxRepo},
};

const SLUG_CONSTRAINT: &str = "blog_posts_slug_key";

/// Helper to compute OFFSET safely from 1-based `page` and `per_page`.
fn page_offset(page: u32, per_page: u32) -> i64 {
    let page = page.saturating_sub(1);
    (page as i64) * (per_page as i64)
}

#[async_trait]
pub trait BlogPostRepository: Sync + Send {
    async fn create_blog_post(&self, post: &BlogPostInsert) -> Result<Uuid, AppError>;
    async fn get_blog_post_by_id(&self, id: &Uuid) -> Result<BlogPost, AppError>;
    async fn get_blog_post_by_slug(&self, slug: &str) -> Result<BlogPost, AppError>;
    async fn update_blog_post(&self, id: &Uuid, changes: &BlogPostChanges) -> Result<BlogPost, AppError>;
    async fn get_all_blog_posts(&self, page: u32, per_page: u32) -> Result<Vec<BlogPost>, AppError>;
    async fn count_blog_posts(&self) -> Result<i64, AppError>;
    async fn delete_blog_post(&self, id: &Uuid) -> Result<(), AppError>;
}

impl SqlxBlogPostRepo {
    pub fn new(repo: SqlxRepo) -> Self {
        SqlxBlogPostRepo { repo }
    }
}

fn map_slug_conflict(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some(SLUG_CONSTRAINT) {
            return AppError::Conflict("Slug already exists".into());
        }
    }
    AppError::from(e)
}

#[async_trait]
impl BlogPostRepository for SqlxBlogPostRepo {
    async fn create_blog_post(&self, post: &BlogPostInsert) -> Result<Uuid, AppError> {
        let pool = self.repo.pool().await?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO blog_posts (id, title, slug, content, external_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.content)
        .bind(&post.external_url)
        .bind(post.created_at)
        .bind(post.updated_at)
        .fetch_one(&pool)
        .await
        .map_err(map_slug_conflict)?;

        Ok(id)
    }

    async fn get_blog_post_by_id(&self, id: &Uuid) -> Result<BlogPost, AppError> {
        let pool = self.repo.pool().await?;

        let row = sqlx::query_as::<_, BlogPostRow>("SELECT * FROM blog_posts WHERE id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await?;

        Ok(row.into())
    }

    async fn get_blog_post_by_slug(&self, slug: &str) -> Result<BlogPost, AppError> {
        let pool = self.repo.pool().await?;

        let row = sqlx::query_as::<_, BlogPostRow>("SELECT * FROM blog_posts WHERE slug = $1")
            .bind(slug)
            .fetch_one(&pool)
            .await?;

        Ok(row.into())
    }

    async fn update_blog_post(&self, id: &Uuid, changes: &BlogPostChanges) -> Result<BlogPost, AppError> {
        let pool = self.repo.pool().await?;

        let row = sqlx::query_as::<_, BlogPostRow>(
            r#"
            UPDATE blog_posts SET
                title = $1,
                slug = $2,
                content = $3,
                external_url = $4,
                updated_at = NOW()
            WHERE id = $5
            RETURNING *
            "#
        )
        .bind(&changes.title)
        .bind(&changes.slug)
        .bind(&changes.content)
        .bind(&changes.external_url)
        .bind(id)
        .fetch_one(&pool)
        .await
        .map_err(map_slug_conflict)?;

        Ok(row.into())
    }

    async fn get_all_blog_posts(&self, page: u32, per_page: u32) -> Result<Vec<BlogPost>, AppError> {
        let pool = self.repo.pool().await?;

        let rows = sqlx::query_as::<_, BlogPostRow>(
            "SELECT * FROM blog_posts ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        )
        .bind(per_page as i64)
        .bind(page_offset(page, per_page))
        .fetch_all(&pool)
        .await?;

        Ok(rows.into_iter().map(BlogPost::from).collect())
    }

    async fn count_blog_posts(&self) -> Result<i64, AppError> {
        let pool = self.repo.pool().await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM blog_posts")
            .fetch_one(&pool)
            .await?;

        Ok(count)
    }

    async fn delete_blog_post(&self, id: &Uuid) -> Result<(), AppError> {
        let pool = self.repo.pool().await?;

        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(&pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Record not found".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::page_offset;

    #[test]
    fn page_offset_is_one_based() {
        assert_eq!(page_offset(1, 10), 0);
        assert_eq!(page_offset(3, 10), 20);
        assert_eq!(page_offset(0, 10), 0);
    }
}
