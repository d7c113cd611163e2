//! Access tokens and password digests
//!
//! Tokens are HS256 JWTs carrying the subject (admin login or customer email)
//! and a role. Passwords are stored as bcrypt hashes.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::config::Config;
use crate::error::AppError;
use crate::model::Token;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Customer,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub exp: usize,
}

pub fn issue_token(config: &Config, subject: &str, role: Role) -> Result<Token, AppError> {
    let expires_at = Utc::now().timestamp() as u64 + config.token_ttl.as_secs();
    let claims = Claims {
        sub: subject.to_owned(),
        role,
        exp: expires_at as usize,
    };

    let access_token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token encoding failed: {}", e)))?;

    Ok(Token {
        access_token,
        token_type: "bearer".to_string(),
    })
}

/// Decodes a bearer token and checks signature, expiry and role
pub fn verify_token(config: &Config, token: &str, role: Role) -> Result<Claims, AppError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Invalid authentication".to_string()))?;

    if data.claims.role != role {
        return Err(AppError::Unauthorized("Invalid authentication".to_string()));
    }
    Ok(data.claims)
}

pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    bcrypt::hash(password, cost)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// A malformed stored hash never matches
pub fn verify_password(password: &str, stored: &str) -> bool {
    bcrypt::verify(password, stored).unwrap_or(false)
}

/// Compares secrets without an early exit on the first differing byte
pub fn secrets_match(given: &str, expected: &str) -> bool {
    given.as_bytes().ct_eq(expected.as_bytes()).into()
}
