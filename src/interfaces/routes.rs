use actix_web::web;

mod admin;
mod api;
mod auth;
mod json_error;
mod pages;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(json_error::config_routes);
    cfg.configure(pages::config_routes);
    cfg.configure(api::config_routes);
    cfg.configure(admin::config_routes);
}
