//! Credential and token capabilities

use chrono::{DateTime, Utc};

#[cfg(test)]
use mockall::automock;

use crate::domain::account::AccountId;
use crate::domain::DomainError;

/// A signed identity token and the instant it stops being accepted
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies signed, time-limited identity tokens
#[cfg_attr(test, automock)]
pub trait TokenService: Send + Sync {
    fn issue(&self, account_id: AccountId) -> Result<IssuedToken, DomainError>;

    /// Fails closed with `Unauthorized` on any signature, algorithm, expiry or format problem
    fn verify(&self, token: &str) -> Result<AccountId, DomainError>;
}

/// Salted, adaptive one-way password hashing
#[cfg_attr(test, automock)]
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    fn verify(&self, password: &str, hash: &str) -> bool;
}
