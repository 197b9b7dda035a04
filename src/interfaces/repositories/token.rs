use jsonwebtoken::TokenData;

use crate::{entities::token::SessionClaims, errors::AuthError};

pub trait SessionTokenService: Send + Sync {
    /// Issues a session token for the given account.
    ///
    /// The server never calls this: sessions are issued by the external login flow.
    /// It exists so tests and operator tooling can mint tokens the middleware accepts.
    fn create_session_token(&self, open_id: &str, name: Option<&str>) -> Result<String, AuthError>;

    /// Decodes a session token and returns the claims
    fn decode_session_token(&self, token: &str) -> Result<TokenData<SessionClaims>, AuthError>;
}
