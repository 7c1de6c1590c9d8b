pub mod auth;
pub mod db;
pub mod payments;
pub mod utils;
