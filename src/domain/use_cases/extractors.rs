use actix_web::{FromRequest, HttpRequest, HttpMessage};
use futures_util::future::{ready, Ready};

use crate::{constants::GUEST_OWNER_ID, entities::user::User};

/// The caller's identity as resolved by the session middleware.
/// Never rejects: a missing or invalid session yields a guest.
/// Usage: Add `caller: CurrentUser` as a parameter to your handler function.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<User>);

impl CurrentUser {
    /// Owner id used to scope generations; all guests share id 0.
    pub fn owner_id(&self) -> i32 {
        self.0.as_ref().map_or(GUEST_OWNER_ID, |user| user.id)
    }
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Ok(CurrentUser(req.extensions().get::<User>().cloned())))
    }
}
