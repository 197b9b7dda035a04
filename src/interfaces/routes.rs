use actix_web::web;

use crate::handlers::home::home;

mod auth;
mod generation;
mod json_error;
mod media;
mod system;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api/v1")
            .configure(auth::config_routes)
            .configure(generation::config_routes)
            .configure(system::config_routes)
    );

    cfg.configure(media::config_routes);
    cfg.configure(json_error::config_routes);
}
