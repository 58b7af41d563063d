//! HS256 identity tokens

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::debug;

use crate::domain::account::AccountId;
use crate::domain::auth::{IssuedToken, TokenService};
use crate::domain::error::MSG_UNAUTHORIZED;
use crate::domain::DomainError;

/// Signing secret shipped for local development only
pub const DEV_JWT_SECRET: &str = "change-me-in-production";

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Upper bound keeping `now + ttl` representable
const MAX_TTL_SECS: u64 = 100 * 365 * 86_400;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Account id
    pub id: i64,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl JwtClaims {
    fn new(account_id: AccountId, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            id: account_id.value(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

/// Configuration for JWT service
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token lifetime in seconds
    pub ttl_secs: u64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, ttl_secs: u64) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs,
        }
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.secret == DEV_JWT_SECRET
    }
}

impl Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[hidden]")
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEV_JWT_SECRET.to_string(),
            ttl_secs: 86_400,
        }
    }
}

/// JWT service signing with a single shared secret
#[derive(Clone)]
pub struct JwtService {
    ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("ttl", &self.ttl)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // Only the fixed algorithm is accepted; tokens claiming anything else are rejected.
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            ttl: Duration::seconds(config.ttl_secs.min(MAX_TTL_SECS) as i64),
            encoding_key,
            decoding_key,
            validation,
        }
    }

    fn issue_at(&self, account_id: AccountId, now: DateTime<Utc>) -> Result<IssuedToken, DomainError> {
        let claims = JwtClaims::new(account_id, now, self.ttl);

        let token = encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to generate JWT: {}", e)))?;

        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or_else(|| DomainError::internal("Token expiry out of range"))?;

        Ok(IssuedToken { token, expires_at })
    }
}

impl TokenService for JwtService {
    fn issue(&self, account_id: AccountId) -> Result<IssuedToken, DomainError> {
        self.issue_at(account_id, Utc::now())
    }

    fn verify(&self, token: &str) -> Result<AccountId, DomainError> {
        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(error = %e, "Rejected token");
                DomainError::unauthorized(MSG_UNAUTHORIZED)
            })?;

        Ok(AccountId::new(token_data.claims.id))
    }
}
