use actix_web::web;

use crate::handlers::generation;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/generation")
            .service(
                web::resource("/generate")
                    .route(web::post().to(generation::generate))
            )
            .service(
                web::resource("/list")
                    .route(web::get().to(generation::list))
            )
            .service(
                web::resource("/delete")
                    .route(web::post().to(generation::delete))
            )
            .service(
                web::resource("/models")
                    .route(web::get().to(generation::models))
            )
    );
}
