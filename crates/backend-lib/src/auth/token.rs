// ============================
// board-backend-lib/src/auth/token.rs
// ============================
//! Signed identity tokens issued on login.
//!
//! Stateless by construction: the server keeps no session record, the token
//! itself proves the identity on later requests.
use board_common::{Principal, Role};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Roles carried over from the member account
    pub roles: Vec<Role>,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Token ID
    pub jti: String,
}

/// Mints and validates HS256 tokens with a configured secret and lifetime.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl_secs as i64),
        }
    }

    /// Mint a signed token for a verified principal.
    pub fn issue(&self, principal: &Principal) -> Result<String, AppError> {
        let now = Utc::now();
        let mut roles: Vec<Role> = principal.roles.iter().copied().collect();
        roles.sort_by_key(|r| r.to_string());

        let claims = Claims {
            sub: principal.username.clone(),
            roles,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Token(format!("token creation failed: {e}")))
    }

    /// Validate a presented token and return its claims.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| AppError::Token(format!("token validation failed: {e}")))
    }
}
