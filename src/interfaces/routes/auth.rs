use actix_web::web;

use crate::handlers::auth;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/session")
                    .route(web::get().to(auth::get_session))
            )
            .service(
                web::resource("/signout")
                    .route(web::post().to(auth::sign_out))
            )
    );
}
