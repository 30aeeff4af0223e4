//! Signed tokens for sessions and emailed links.
//!
//! DESIGN
//! ======
//! One HMAC seed (`JWT_SEED`) signs every token. Each token names the purpose
//! it was issued for, and [`JwtAdapter::validate`] only accepts a token for
//! that same purpose, so an emailed reset link can never be replayed as a
//! session credential.

use std::time::Duration;

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Lifetime of email-validation links.
pub const EMAIL_VALIDATION_TTL: Duration = Duration::from_secs(24 * 3600);
/// Lifetime of password-reset links.
pub const PASSWORD_RESET_TTL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    Session,
    EmailValidation,
    PasswordReset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID.
    pub sub: Uuid,
    pub email: String,
    pub purpose: TokenPurpose,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
#[error("token signing failed: {0}")]
pub struct JwtError(#[from] jsonwebtoken::errors::Error);

#[derive(Clone)]
pub struct JwtAdapter {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtAdapter {
    #[must_use]
    pub fn new(seed: &str) -> Self {
        Self { encoding: EncodingKey::from_secret(seed.as_bytes()), decoding: DecodingKey::from_secret(seed.as_bytes()) }
    }

    /// Sign a token for `user_id` valid for `ttl` from now.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn generate(&self, user_id: Uuid, email: &str, purpose: TokenPurpose, ttl: Duration) -> Result<String, JwtError> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims { sub: user_id, email: email.to_owned(), purpose, iat: now, exp: now.saturating_add(ttl_secs) };
        self.encode(&claims)
    }

    pub(crate) fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        Ok(jsonwebtoken::encode(&Header::default(), claims, &self.encoding)?)
    }

    /// Decode and check a token. Returns `None` when the signature, expiry, or
    /// purpose does not match.
    #[must_use]
    pub fn validate(&self, token: &str, purpose: TokenPurpose) -> Option<Claims> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &Validation::default()).ok()?;
        (data.claims.purpose == purpose).then_some(data.claims)
    }
}

#[cfg(test)]
#[path = "jwt_test.rs"]
mod tests;
