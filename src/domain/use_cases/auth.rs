use std::sync::Arc;

use crate::entities::user::User;
use crate::errors::AuthError;
use crate::repositories::{token::SessionTokenService, user::UserRepository};

pub struct AuthHandler {
    pub user_repo: Arc<dyn UserRepository>,
    pub token_service: Arc<dyn SessionTokenService>,
}

impl AuthHandler {
    pub fn new(user_repo: Arc<dyn UserRepository>, token_service: Arc<dyn SessionTokenService>) -> Self {
        AuthHandler {
            user_repo,
            token_service,
        }
    }

    /// Maps a session token to its account. `Ok(None)` means the token is valid but the
    /// account no longer exists.
    pub async fn authenticate(&self, token: &str) -> Result<Option<User>, AuthError> {
        let decoded = self.token_service.decode_session_token(token)?;
        let user = self.user_repo.get_user_by_open_id(&decoded.claims.sub).await?;
        Ok(user)
    }

    /// Like [`authenticate`](Self::authenticate) but any failure degrades to a guest.
    pub async fn resolve_session(&self, token: &str) -> Option<User> {
        match self.authenticate(token).await {
            Ok(user) => user,
            Err(AuthError::LookupFailed(msg)) => {
                tracing::warn!("Session user lookup failed: {}", msg);
                None
            }
            Err(e) => {
                tracing::debug!("Ignoring session token: {}", e);
                None
            }
        }
    }
}
