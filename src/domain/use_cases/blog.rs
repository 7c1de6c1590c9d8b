use std::sync::Arc;

use validator::Validate;

use crate::{
    entities::blog_post::{
        BlogPost, BlogPostCreatedResponse, BlogPostInsert, BlogPostPage, NewBlogPostRequest,
        UpdateBlogPostRequest,
    },
    errors::AppError,
    repositories::blog_post::BlogPostRepository,
    utils::valid_uuid::valid_uuid,
};

pub const MAX_PER_PAGE: u32 = 100;

pub struct BlogPostHandler {
    pub blog_post_repo: Arc<dyn BlogPostRepository>,
}

impl BlogPostHandler {
    pub fn new(blog_post_repo: Arc<dyn BlogPostRepository>) -> Self {
        BlogPostHandler { blog_post_repo }
    }

    /// Creates a new blog post with the provided data
    pub async fn create_blog_post(&self, post: NewBlogPostRequest) -> Result<BlogPostCreatedResponse, AppError> {
        let insert_post = BlogPostInsert::try_from(post)?;

        let id = self.blog_post_repo.create_blog_post(&insert_post).await?;
        tracing::info!(%id, slug = %insert_post.slug, "Blog post created");

        Ok(BlogPostCreatedResponse {
            id,
            url: format!("/blog/{}", insert_post.slug),
            slug: insert_post.slug,
        })
    }

    /// Retrieves a blog post by its slug
    pub async fn get_blog_post_by_slug(&self, slug: &str) -> Result<BlogPost, AppError> {
        self.blog_post_repo
            .get_blog_post_by_slug(slug)
            .await
            .map_err(not_found)
    }

    /// Newest posts first; `per_page` is capped at [`MAX_PER_PAGE`]
    pub async fn get_blog_posts(&self, page: u32, per_page: u32) -> Result<BlogPostPage, AppError> {
        let page = page.max(1);
        let per_page = per_page.clamp(1, MAX_PER_PAGE);

        let posts = self.blog_post_repo.get_all_blog_posts(page, per_page).await?;
        let total = self.blog_post_repo.count_blog_posts().await?;

        Ok(BlogPostPage {
            posts: posts.iter().map(BlogPost::to_summary).collect(),
            page,
            per_page,
            total,
        })
    }

    /// Updates an existing blog post
    pub async fn update_blog_post(
        &self,
        id: &str,
        post: UpdateBlogPostRequest,
    ) -> Result<BlogPost, AppError> {
        post.validate()?;

        let valid_id = valid_uuid(id)?;
        let current = self.blog_post_repo
            .get_blog_post_by_id(&valid_id)
            .await
            .map_err(not_found)?;

        let changes = post.resolve(&current)?;
        self.blog_post_repo.update_blog_post(&valid_id, &changes).await
    }

    /// Deletes a blog post by its ID
    pub async fn delete_blog_post(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_uuid(id)?;

        self.blog_post_repo
            .delete_blog_post(&valid_id)
            .await
            .map_err(not_found)
    }

    pub async fn count_blog_posts(&self) -> Result<i64, AppError> {
        self.blog_post_repo.count_blog_posts().await
    }
}

fn not_found(e: AppError) -> AppError {
    match e {
        AppError::NotFound(_) => AppError::NotFound("Blog post not found".to_string()),
        _ => e,
    }
}
