use actix_web::{
    cookie::{Cookie, SameSite},
    web, HttpResponse, Responder,
};
use tracing::instrument;

use crate::{entities::generation::SuccessResponse, use_cases::extractors::CurrentUser, AppState};

#[instrument(skip(caller))]
pub async fn me(caller: CurrentUser) -> impl Responder {
    HttpResponse::Ok().json(caller.0)
}

#[instrument(skip(state, caller), fields(owner_id = caller.owner_id()))]
pub async fn logout(state: web::Data<AppState>, caller: CurrentUser) -> impl Responder {
    let settings = &state.session_cookie;

    let mut cookie = Cookie::build(settings.name.clone(), "")
        .path("/")
        .http_only(true)
        .secure(settings.secure)
        .same_site(if settings.secure { SameSite::None } else { SameSite::Lax })
        .finish();
    cookie.make_removal();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(SuccessResponse::ok())
}
