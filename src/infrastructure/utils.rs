pub mod markdown;
pub mod redirect;
pub mod valid_uuid;
