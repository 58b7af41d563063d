//! Login

use std::sync::Arc;

use tracing::info;

use crate::domain::account::{normalize_email, AccountRepository};
use crate::domain::auth::{IssuedToken, PasswordHasher, TokenService};
use crate::domain::error::{MSG_EMAIL_NOT_REGISTERED, MSG_WRONG_PASSWORD};
use crate::domain::DomainError;

/// Exchanges credentials for an identity token
pub struct AuthService<R: AccountRepository, H: PasswordHasher, T: TokenService> {
    accounts: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<R: AccountRepository, H: PasswordHasher, T: TokenService> AuthService<R, H, T> {
    pub fn new(accounts: Arc<R>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            accounts,
            hasher,
            tokens,
        }
    }

    /// `EmailNotRegistered` when no account has the email, `WrongCredential` on a bad password
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, DomainError> {
        let email = normalize_email(email);

        let account = match self.accounts.get_by_email(&email).await {
            Ok(account) => account,
            Err(e) if e.is_not_found() => {
                return Err(DomainError::email_not_registered(MSG_EMAIL_NOT_REGISTERED));
            }
            Err(e) => return Err(e),
        };

        if !self.hasher.verify(password, account.password_hash()) {
            return Err(DomainError::wrong_credential(MSG_WRONG_PASSWORD));
        }

        let issued = self.tokens.issue(account.id())?;

        info!(account_id = %account.id(), "Login succeeded");
        Ok(issued)
    }
}
