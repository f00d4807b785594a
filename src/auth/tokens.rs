//! HS256 session tokens for the demo login

use anyhow::{Context, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use uuid::Uuid;

use super::Claims;
use crate::domain::Role;

/// Issues and verifies session tokens
#[derive(Clone)]
pub struct TokenKeys {
    inner: Arc<TokenKeysInner>,
}

struct TokenKeysInner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    ttl_seconds: i64,
}

impl TokenKeys {
    pub fn new(secret: &str, issuer: String, ttl_seconds: i64) -> Self {
        Self {
            inner: Arc::new(TokenKeysInner {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
                issuer,
                ttl_seconds,
            }),
        }
    }

    /// Sign a token for the given user
    pub fn issue(&self, user_id: Uuid, role: Role) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iss: self.inner.issuer.clone(),
            iat: now,
            exp: now + self.inner.ttl_seconds,
            role: role.to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.inner.encoding)
            .context("Failed to sign session token")
    }

    /// Verify a token and return the claims
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.inner.issuer]);
        validation.validate_exp = true;

        let data = decode::<Claims>(token, &self.inner.decoding, &validation)
            .context("Token validation failed")?;
        Ok(data.claims)
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.inner.ttl_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_then_verify() {
        let keys = TokenKeys::new("secret", "test".to_string(), 60);
        let user_id = Uuid::new_v4();
        let token = keys.issue(user_id, Role::Professional).unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, "professional");
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let keys = TokenKeys::new("secret", "test".to_string(), 60);
        let other = TokenKeys::new("other", "test".to_string(), 60);
        let token = keys.issue(Uuid::new_v4(), Role::Client).unwrap();
        assert!(other.verify(&token).is_err());
    }
}
