use actix_web::web;

use crate::handlers::pages;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(pages::home)))
        .service(web::resource("/login").route(web::get().to(pages::login)))
        .service(web::resource("/tos").route(web::get().to(pages::terms_of_service)))
        .service(web::resource("/privacy-policy").route(web::get().to(pages::privacy_policy)))
        .service(web::resource("/launch").route(web::get().to(pages::launch)))
        .service(web::resource("/directories").route(web::get().to(pages::directories)))
        .service(web::resource("/blog").route(web::get().to(pages::blog_index)))
        .service(web::resource("/blog/{slug}").route(web::get().to(pages::blog_post)));
}
