use axum::http::HeaderValue;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::core::config::SessionConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::SessionClaims;
use crate::shared::constants::SESSION_COOKIE;
use crate::shared::cookies::{clear_cookie, set_cookie};

/// Mints and verifies HS256 session tokens
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: SessionConfig,
}

impl SessionService {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            config,
        }
    }

    /// Issue a session token for the given user
    pub fn issue(&self, user_id: Uuid) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.config.ttl.as_secs() as i64,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign session token: {}", e)))
    }

    /// Verify a session token and return the user id it was issued for
    pub fn verify(&self, token: &str) -> Result<Uuid> {
        let validation = Validation::new(Algorithm::HS256);

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid session: {}", e)))?;

        Uuid::parse_str(&data.claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid session subject".to_string()))
    }

    /// `Set-Cookie` value carrying a session token
    pub fn session_cookie(&self, token: &str) -> HeaderValue {
        set_cookie(
            SESSION_COOKIE,
            token,
            Some(self.config.ttl.as_secs()),
            self.config.cookie_secure,
        )
    }

    /// `Set-Cookie` value ending the session
    pub fn clear_session_cookie(&self) -> HeaderValue {
        clear_cookie(SESSION_COOKIE)
    }
}
