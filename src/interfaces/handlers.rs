pub mod auth;
pub mod blog_posts;
pub mod checkout;
pub mod directories;
pub mod json_error;
pub mod launch_weeks;
pub mod pages;
pub mod system;
pub mod users;
