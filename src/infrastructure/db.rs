pub mod connection;
pub mod postgres;
