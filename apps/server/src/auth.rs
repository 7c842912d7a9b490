//! Password hashing and stateless JWT sessions.
//!
//! [`Argon2Hasher`] plugs into the core credential service through the
//! `PasswordHasherTrait` seam; [`AuthManager`] mints and verifies the
//! bearer tokens the API hands out. Logout is client-side: tokens are
//! not tracked server-side and simply expire.

use std::sync::Arc;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use paperfolio_core::errors::Error as CoreError;
use paperfolio_core::users::PasswordHasherTrait;

use crate::config::AuthConfig;
use crate::error::ApiError;
use crate::main_lib::AppState;

/// Argon2id password hashing behind the core hasher trait.
#[derive(Default)]
pub struct Argon2Hasher;

impl PasswordHasherTrait for Argon2Hasher {
    fn hash_password(&self, plaintext: &str) -> paperfolio_core::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CoreError::Unexpected(format!("Password hashing failed: {}", e)))
    }

    fn verify_password(&self, plaintext: &str, stored_hash: &str) -> paperfolio_core::Result<bool> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| CoreError::Unexpected(format!("Stored password hash is invalid: {}", e)))?;
        match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(CoreError::Unexpected(format!(
                "Password verification failed: {}",
                e
            ))),
        }
    }
}

/// JWT claims carried by an access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
}

/// Issues and verifies HS256 access tokens.
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl_secs: u64,
}

impl AuthManager {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(&config.jwt_secret),
            decoding_key: DecodingKey::from_secret(&config.jwt_secret),
            validation: Validation::new(Algorithm::HS256),
            token_ttl_secs: config.token_ttl_secs,
        }
    }

    pub fn token_ttl_secs(&self) -> u64 {
        self.token_ttl_secs
    }

    /// Mints a signed token for the given user id.
    pub fn issue_token(&self, user_id: &str) -> anyhow::Result<String> {
        let iat = Utc::now().timestamp() as u64;
        let claims = Claims {
            sub: user_id.to_string(),
            iat,
            exp: iat + self.token_ttl_secs,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Decodes and validates a token, including its expiry.
    pub fn verify_token(&self, token: &str) -> Result<Claims, ApiError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| ApiError::unauthorized("Invalid or expired token"))
    }
}

/// The authenticated user, inserted into request extensions by
/// [`require_jwt`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: String,
}

/// Middleware guarding the protected router: rejects requests without a
/// valid bearer token and exposes the user id to handlers.
pub async fn require_jwt(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| ApiError::unauthorized("Missing bearer token"))?;
    let claims = state.auth.verify_token(token)?;
    request.extensions_mut().insert(CurrentUser {
        user_id: claims.sub,
    });
    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_manager(ttl_secs: u64) -> AuthManager {
        AuthManager::new(&AuthConfig {
            jwt_secret: vec![7u8; 32],
            token_ttl_secs: ttl_secs,
        })
    }

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hasher = Argon2Hasher;
        let hash = hasher.hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(hasher.verify_password("correct horse", &hash).unwrap());
        assert!(!hasher.verify_password("battery staple", &hash).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        let hasher = Argon2Hasher;
        assert!(hasher.verify_password("anything", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_issued_token_round_trips() {
        let manager = test_manager(3600);
        let token = manager.issue_token("user-1").unwrap();
        let claims = manager.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.exp, claims.iat + 3600);
    }

    #[test]
    fn test_token_signed_with_other_key_rejected() {
        let manager = test_manager(3600);
        let other = AuthManager::new(&AuthConfig {
            jwt_secret: vec![9u8; 32],
            token_ttl_secs: 3600,
        });
        let token = other.issue_token("user-1").unwrap();
        assert!(manager.verify_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let manager = test_manager(3600);
        // Expired beyond the default 60s validation leeway.
        let iat = Utc::now().timestamp() as u64 - 7200;
        let claims = Claims {
            sub: "user-1".to_string(),
            iat,
            exp: iat + 60,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&[7u8; 32]),
        )
        .unwrap();
        assert!(manager.verify_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let manager = test_manager(3600);
        assert!(manager.verify_token("not.a.jwt").is_err());
    }
}
