use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Claims embedded in every bearer token: who the user is, which account
/// they belong to, and the email used to re-load them on each request.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub account_id: Uuid,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, account_id: Uuid, email: String, expiry_days: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            account_id,
            email,
            iat: now.timestamp(),
            exp: (now + Duration::days(expiry_days)).timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token generation failed: {0}")]
    Generation(jsonwebtoken::errors::Error),

    #[error("{0}")]
    Invalid(jsonwebtoken::errors::Error),
}

pub fn generate_jwt(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(TokenError::Generation)
}

/// Verify signature and expiry, returning the decoded claims.
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, TokenError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(TokenError::Invalid)
}

pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, cost)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(password, hash)
}
