use actix_web::web;

use crate::{
    handlers::{blog_posts, directories, launch_weeks, pages, system, users},
    middlewares::admin::AdminGate,
};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(AdminGate)
            .service(
                web::resource("")
                    .route(web::get().to(pages::admin_dashboard))
            )
            .service(
                web::resource("/health")
                    .route(web::get().to(system::admin_health_check))
            )
            .service(
                web::scope("/api")
                    .service(
                        web::resource("/directories")
                            .route(web::post().to(directories::create_directory))
                    )
                    .service(
                        web::resource("/directories/{directory_id}")
                            .route(web::delete().to(directories::delete_directory))
                    )
                    .service(
                        web::resource("/blog")
                            .route(web::post().to(blog_posts::create_blog_post))
                    )
                    .service(
                        web::resource("/blog/{post_id}")
                            .route(web::patch().to(blog_posts::update_blog_post))
                            .route(web::delete().to(blog_posts::delete_blog_post))
                    )
                    .service(
                        web::resource("/launch-weeks")
                            .route(web::post().to(launch_weeks::create_launch_week))
                    )
                    .service(
                        web::resource("/launch-weeks/{week_id}")
                            .route(web::delete().to(launch_weeks::delete_launch_week))
                    )
                    .service(
                        web::resource("/launch-weeks/{week_id}/slots")
                            .route(web::post().to(launch_weeks::reserve_slot))
                    )
                    .service(
                        web::resource("/launch-weeks/{week_id}/slots/{startup_id}")
                            .route(web::delete().to(launch_weeks::release_slot))
                    )
                    .service(
                        web::resource("/users")
                            .route(web::get().to(users::list_users))
                    )
                    .service(
                        web::resource("/users/{user_id}/role")
                            .route(web::patch().to(users::update_user_role))
                    )
            )
    );
}
