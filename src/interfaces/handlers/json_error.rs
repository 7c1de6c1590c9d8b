use actix_web::{http::StatusCode, HttpResponse};

/// Bare `{ "error": ... }` body for handlers that answer errors themselves.
pub fn json_error(status: StatusCode, error: &str) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({
        "error": error
    }))
}
