use actix_web::web;

use crate::handlers::{blog_posts, checkout, directories, launch_weeks};

use super::auth;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(auth::config_routes)
            .service(
                web::resource("/directories")
                    .route(web::get().to(directories::list_directories))
            )
            .service(
                web::resource("/blog")
                    .route(web::get().to(blog_posts::get_all_blog_posts))
            )
            .service(
                web::resource("/blog/{slug}")
                    .route(web::get().to(blog_posts::get_blog_post_by_slug))
            )
            .service(
                web::resource("/launch-weeks")
                    .route(web::get().to(launch_weeks::list_launch_weeks))
            )
            .service(
                web::resource("/launch-weeks/{week_id}")
                    .route(web::get().to(launch_weeks::get_launch_week))
            )
            .service(
                web::resource("/checkout")
                    .route(web::post().to(checkout::start_checkout))
            )
            .service(
                web::resource("/webhook")
                    .route(web::post().to(checkout::payment_webhook))
            )
    );
}
