use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Admin username
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(username: impl Into<String>, expiry_minutes: i64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::minutes(expiry_minutes)).timestamp();

        Self {
            sub: username.into(),
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Admin account is disabled")]
    Inactive,

    #[error("{0}")]
    InvalidToken(String),

    #[error("JWT secret not configured")]
    SecretNotConfigured,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Password hashing error: {0}")]
    Hashing(String),
}

/// Issue an HS256 access token for `username`
pub fn generate_jwt(security: &SecurityConfig, username: &str) -> Result<String, AuthError> {
    if security.jwt_secret.is_empty() {
        return Err(AuthError::SecretNotConfigured);
    }

    let claims = Claims::new(username, security.jwt_expiry_minutes);
    let encoding_key = EncodingKey::from_secret(security.jwt_secret.as_bytes());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

/// Validate signature and expiry, returning the claims
pub fn validate_jwt(security: &SecurityConfig, token: &str) -> Result<Claims, AuthError> {
    if security.jwt_secret.is_empty() {
        return Err(AuthError::SecretNotConfigured);
    }

    let decoding_key = DecodingKey::from_secret(security.jwt_secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
        .map_err(|e| AuthError::InvalidToken(format!("Invalid JWT token: {}", e)))?;

    Ok(token_data.claims)
}

/// Hash a password using Argon2id.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hashing(e.to_string()))?;

    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hashed: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hashed) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn security() -> SecurityConfig {
        SecurityConfig {
            jwt_secret: "unit-test-secret".to_string(),
            jwt_expiry_minutes: 30,
        }
    }

    #[test]
    fn token_round_trip_keeps_subject() {
        let token = generate_jwt(&security(), "admin").unwrap();
        let claims = validate_jwt(&security(), &token).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let token = generate_jwt(&security(), "admin").unwrap();
        let other = SecurityConfig {
            jwt_secret: "different".to_string(),
            jwt_expiry_minutes: 30,
        };
        assert!(matches!(validate_jwt(&other, &token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn rejects_expired_token() {
        let expired = SecurityConfig {
            jwt_expiry_minutes: -10,
            ..security()
        };
        let token = generate_jwt(&expired, "admin").unwrap();
        assert!(validate_jwt(&security(), &token).is_err());
    }

    #[test]
    fn empty_secret_is_refused() {
        let empty = SecurityConfig {
            jwt_secret: String::new(),
            jwt_expiry_minutes: 30,
        };
        assert!(matches!(generate_jwt(&empty, "admin"), Err(AuthError::SecretNotConfigured)));
    }

    #[test]
    fn password_hash_verifies() {
        let hash = hash_password("hunter2").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("wrong", &hash));
        assert!(!verify_password("hunter2", "not-a-hash"));
    }
}
