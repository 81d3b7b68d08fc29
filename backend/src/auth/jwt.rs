//! JWT token generation and validation
//!
//! Access and refresh tokens share one signing secret. The encoding and
//! decoding keys are derived once at startup and cached in [`JwtService`],
//! which is cheap to clone across request handlers.

use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

const ACCESS_TOKEN: &str = "access";
const REFRESH_TOKEN: &str = "refresh";

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Token type: "access" or "refresh"
    pub token_type: String,
}

/// JWT service with pre-computed keys
///
/// Create once at startup and store in `AppState`; do not build per-request.
#[derive(Clone)]
pub struct JwtService {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
    access_expiry_secs: i64,
    refresh_expiry_secs: i64,
}

impl JwtService {
    pub fn new(secret: &str, access_expiry_secs: i64, refresh_expiry_secs: i64) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            access_expiry_secs,
            refresh_expiry_secs,
        }
    }

    /// Generate an access token for a user
    pub fn generate_access_token(&self, user_id: Uuid) -> Result<String> {
        self.generate_token(user_id, ACCESS_TOKEN, self.access_expiry_secs)
    }

    /// Generate a refresh token for a user
    pub fn generate_refresh_token(&self, user_id: Uuid) -> Result<String> {
        self.generate_token(user_id, REFRESH_TOKEN, self.refresh_expiry_secs)
    }

    fn generate_token(&self, user_id: Uuid, token_type: &str, expiry_secs: i64) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + Duration::seconds(expiry_secs)).timestamp(),
            iat: now.timestamp(),
            token_type: token_type.to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to generate {} token: {}", token_type, e))
    }

    fn validate_token(&self, token: &str, expected_type: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?;

        if data.claims.token_type != expected_type {
            return Err(anyhow::anyhow!("Not an {} token", expected_type));
        }
        Ok(data.claims)
    }

    /// Validate an access token and return its claims
    pub fn validate_access_token(&self, token: &str) -> Result<Claims> {
        self.validate_token(token, ACCESS_TOKEN)
    }

    /// Validate a refresh token and return its claims
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims> {
        self.validate_token(token, REFRESH_TOKEN)
    }

    /// Access token lifetime, reported to clients in auth responses
    pub fn access_token_expiry_secs(&self) -> i64 {
        self.access_expiry_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> JwtService {
        JwtService::new("test-secret", 3600, 604800)
    }

    #[test]
    fn access_token_round_trips() {
        let service = test_service();
        let user_id = Uuid::new_v4();

        let token = service.generate_access_token(user_id).unwrap();
        let claims = service.validate_access_token(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.token_type, "access");
    }

    #[test]
    fn refresh_token_round_trips() {
        let service = test_service();
        let user_id = Uuid::new_v4();

        let token = service.generate_refresh_token(user_id).unwrap();
        let claims = service.validate_refresh_token(&token).unwrap();

        assert_eq!(claims.token_type, "refresh");
    }

    #[test]
    fn access_token_rejected_as_refresh() {
        let service = test_service();
        let token = service.generate_access_token(Uuid::new_v4()).unwrap();

        assert!(service.validate_refresh_token(&token).is_err());
    }

    #[test]
    fn garbage_token_rejected() {
        assert!(test_service().validate_access_token("not.a.token").is_err());
    }

    #[test]
    fn tokens_from_other_secret_rejected() {
        let token = JwtService::new("other-secret", 3600, 604800)
            .generate_access_token(Uuid::new_v4())
            .unwrap();

        assert!(test_service().validate_access_token(&token).is_err());
    }
}
