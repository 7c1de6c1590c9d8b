use actix_web::{http::header::LOCATION, HttpResponse};

/// Temporary redirect used by the route and admin gates.
pub fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, location))
        .finish()
}
