use jsonwebtoken::{encode, Header, decode, Validation, TokenData, Algorithm};
use chrono::{Utc, Duration};

use crate::entities::token::SessionClaims;
use crate::repositories::token::SessionTokenService;
use crate::settings::{AppConfig, SessionKeys};
use crate::errors::AuthError;

const SESSION_ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Clone)]
pub struct JwtSessionService {
    keys: SessionKeys,
    expiration: Duration,
}

impl JwtSessionService {
    pub fn new(config: &AppConfig) -> Self {
        JwtSessionService {
            keys: SessionKeys::from(config),
            expiration: Duration::days(config.session_expiration_days),
        }
    }
}

impl SessionTokenService for JwtSessionService {
    fn create_session_token(&self, open_id: &str, name: Option<&str>) -> Result<String, AuthError> {
        if open_id.trim().is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let now = Utc::now();
        let claims = SessionClaims {
            sub: open_id.to_string(),
            name: name.map(str::to_string),
            exp: (now + self.expiration).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(SESSION_ALGORITHM), &claims, &self.keys.encoding)
            .map_err(|_| AuthError::TokenCreation)
    }

    fn decode_session_token(&self, token: &str) -> Result<TokenData<SessionClaims>, AuthError> {
        let mut validation = Validation::new(SESSION_ALGORITHM);
        validation.validate_exp = true;

        let data = decode::<SessionClaims>(token, &self.keys.decoding, &validation)?;
        if data.claims.sub.trim().is_empty() {
            return Err(AuthError::InvalidToken);
        }
        Ok(data)
    }
}
