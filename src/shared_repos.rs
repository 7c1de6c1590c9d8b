use std::sync::Arc;

use crate::{
    db::postgres::PgConnections,
    repositories::{
        blog_post::BlogPostRepository,
        directory::DirectoryRepository,
        launch_week::LaunchWeekRepository,
        sqlx_repo::{SqlxBlogPostRepo, SqlxDirectoryRepo, SqlxLaunchWeekRepo, SqlxRepo, SqlxUserRepo},
        user::UserRepository,
    },
};

/// One handle per store concern, shared by the use-case handlers.
#[derive(Clone)]
pub struct SharedRepositories {
    pub user_repo: Arc<dyn UserRepository>,
    pub blog_post_repo: Arc<dyn BlogPostRepository>,
    pub launch_week_repo: Arc<dyn LaunchWeekRepository>,
    pub directory_repo: Arc<dyn DirectoryRepository>,
}

impl SharedRepositories {
    pub fn postgres(db: Arc<PgConnections>) -> Self {
        let repo = SqlxRepo::new(db);

        SharedRepositories {
            user_repo: Arc::new(SqlxUserRepo::new(repo.clone())),
            blog_post_repo: Arc::new(SqlxBlogPostRepo::new(repo.clone())),
            launch_week_repo: Arc::new(SqlxLaunchWeekRepo::new(repo.clone())),
            directory_repo: Arc::new(SqlxDirectoryRepo::new(repo)),
        }
    }
}
