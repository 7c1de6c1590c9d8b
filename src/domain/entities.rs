pub mod blog_post;
pub mod checkout;
pub mod directory;
pub mod launch_week;
pub mod option_fields;
pub mod session;
pub mod user;
