//! JWT token generation and validation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use uuid::Uuid;

use crate::domain::DomainError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user id)
    pub sub: String,
    /// Email at the time the token was issued
    pub email: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl JwtClaims {
    pub fn new(user_id: Uuid, email: &str, expiration_hours: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours as i64);

        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Parse the subject back into a user id.
    pub fn user_id(&self) -> Result<Uuid, DomainError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| DomainError::invalid_credentials("Token subject is not a valid user id"))
    }
}

/// Configuration for the JWT service
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: u64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            expiration_hours: 24,
        }
    }
}

/// HS256 JWT service
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expiration_hours", &self.config.expiration_hours)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    pub fn with_default_config() -> Self {
        Self::new(JwtConfig::default())
    }

    /// Generate a signed token for a user.
    pub fn generate(&self, user_id: Uuid, email: &str) -> Result<String, DomainError> {
        let claims = JwtClaims::new(user_id, email, self.config.expiration_hours);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to generate JWT: {}", e)))
    }

    /// Validate a token and return its claims.
    pub fn validate(&self, token: &str) -> Result<JwtClaims, DomainError> {
        let validation = Validation::default();

        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| DomainError::invalid_credentials(format!("Invalid JWT: {}", e)))?;

        Ok(token_data.claims)
    }

    pub fn expiration_hours(&self) -> u64 {
        self.config.expiration_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new(JwtConfig::new("test-secret", 1))
    }

    #[test]
    fn test_generate_and_validate() {
        let service = service();
        let user_id = Uuid::new_v4();

        let token = service.generate(user_id, "test@example.com").unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.email, "test@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_validate_rejects_wrong_secret() {
        let token = service()
            .generate(Uuid::new_v4(), "test@example.com")
            .unwrap();

        let other = JwtService::new(JwtConfig::new("other-secret", 1));
        let err = other.validate(&token).unwrap_err();

        assert!(matches!(err, DomainError::InvalidCredentials { .. }));
    }

    #[test]
    fn test_validate_rejects_garbage() {
        assert!(service().validate("not-a-token").is_err());
    }

    #[test]
    fn test_claims_reject_non_uuid_subject() {
        let claims = JwtClaims {
            sub: "not-a-uuid".to_string(),
            email: "test@example.com".to_string(),
            iat: 0,
            exp: 0,
        };

        assert!(claims.user_id().is_err());
    }
}
