pub mod blog;
pub mod checkout;
pub mod directories;
pub mod extractors;
pub mod launch_weeks;
pub mod users;
