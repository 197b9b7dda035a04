use actix_web::web;

use crate::handlers::auth;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/me")
                    .route(web::get().to(auth::me))
            )
            .service(
                web::resource("/logout")
                    .route(web::post().to(auth::logout))
            )
    );
}
