//! Bearer token issuing and verification.
//!
//! Tokens are HS256 JWTs keyed with the configured secret. The subject is
//! the user ID; `exp` is set from the configured lifetime and checked on
//! every request. The auth middleware then loads the user to make sure it
//! still exists.

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User ID
    sub: String,
    iat: usize,
    exp: usize,
}

#[derive(Clone)]
pub struct TokenService {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: impl AsRef<[u8]>, ttl: Duration) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_ref())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_ref())),
            ttl,
        }
    }

    /// Issue a fresh token for `user_id`.
    pub fn generate(&self, user_id: i64) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp().max(0) as usize,
            exp: (now + self.ttl).timestamp().max(0) as usize,
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Check signature and expiry, and return the user ID the token was issued for.
    pub fn validate(&self, token: &str) -> Result<i64, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            AppError::Unauthorized
        })?;

        data.claims.sub.parse().map_err(|_| AppError::Unauthorized)
    }
}
