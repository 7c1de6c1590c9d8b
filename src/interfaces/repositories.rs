pub mod blog_post;
pub mod directory;
pub mod launch_week;
pub mod sqlx_repo;
pub mod user;
pub mod payment_gateway;
