use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id, as a string per RFC 7519
    pub sub: String,
    pub name: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: i64, name: impl Into<String>, expiry_hours: u64) -> Result<Self, JwtError> {
        let now = Utc::now();
        let exp = i64::try_from(expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                JwtError::TokenGeneration(format!("token expiry of {} hours is out of range", expiry_hours))
            })?;

        Ok(Self {
            sub: user_id.to_string(),
            name: name.into(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        })
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),

    #[error("JWT secret not configured")]
    InvalidSecret,
}

/// HS256 signing keys derived once from the configured secret
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry_hours: u64,
}

impl JwtKeys {
    pub fn new(secret: &str, expiry_hours: u64) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        })
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, JwtError> {
        Self::new(&security.jwt_secret, security.jwt_expiry_hours)
    }

    /// Issue a token for the given user using the configured expiry
    pub fn issue(&self, user_id: i64, name: &str) -> Result<String, JwtError> {
        self.generate(&Claims::new(user_id, name, self.expiry_hours)?)
    }

    pub fn generate(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }

    /// Verify signature and expiry, returning the embedded claims
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        let validation = Validation::default();

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_validates() {
        let keys = JwtKeys::new("unit-test-secret", 1).unwrap();
        let token = keys.issue(42, "alice").unwrap();

        let claims = keys.validate(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.name, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let ours = JwtKeys::new("unit-test-secret", 1).unwrap();
        let theirs = JwtKeys::new("someone-else", 1).unwrap();
        let token = theirs.issue(1, "mallory").unwrap();

        assert!(matches!(ours.validate(&token), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn rejects_expired_token() {
        let keys = JwtKeys::new("unit-test-secret", 1).unwrap();
        let now = Utc::now().timestamp();
        // Well past the default 60s leeway
        let claims = Claims {
            sub: "7".into(),
            name: "bob".into(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = keys.generate(&claims).unwrap();

        assert!(keys.validate(&token).is_err());
    }

    #[test]
    fn out_of_range_expiry_is_an_error() {
        let keys = JwtKeys::new("unit-test-secret", u64::MAX).unwrap();
        assert!(matches!(keys.issue(1, "alice"), Err(JwtError::TokenGeneration(_))));

        let keys = JwtKeys::new("unit-test-secret", i64::MAX as u64).unwrap();
        assert!(matches!(keys.issue(1, "alice"), Err(JwtError::TokenGeneration(_))));
    }

    #[test]
    fn empty_secret_is_rejected() {
        assert!(matches!(JwtKeys::new("", 1), Err(JwtError::InvalidSecret)));
    }
}
