//! Account use cases: registration, profile and password changes, removal

use std::sync::Arc;

use tracing::info;

use crate::domain::account::{
    normalize_email, validate_email, validate_name, validate_password, Account, AccountId,
    AccountRepository, NewAccount,
};
use crate::domain::auth::{gate, PasswordHasher, RequestContext};
use crate::domain::error::{MSG_EMAIL_REGISTERED, MSG_WRONG_PASSWORD};
use crate::domain::pagination::PageRequest;
use crate::domain::DomainError;

/// Request for registering a new account
#[derive(Clone)]
pub struct RegisterAccountRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for RegisterAccountRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterAccountRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Request for changing an account's name and email
#[derive(Debug, Clone)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub email: String,
}

/// Request for changing an account's password
#[derive(Clone)]
pub struct UpdatePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Account service
#[derive(Debug)]
pub struct AccountService<R: AccountRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: AccountRepository, H: PasswordHasher> AccountService<R, H> {
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Register a new account. Fails with `Conflict` when the email is taken.
    pub async fn register(&self, request: RegisterAccountRequest) -> Result<Account, DomainError> {
        let email = normalize_email(&request.email);

        validate_name(&request.name).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_email(&email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password).map_err(|e| DomainError::validation(e.to_string()))?;

        if self.email_owner(&email).await?.is_some() {
            return Err(DomainError::conflict(MSG_EMAIL_REGISTERED));
        }

        let password_hash = self.hasher.hash(&request.password)?;

        let account = self
            .repository
            .create(NewAccount {
                name: request.name.trim().to_string(),
                email,
                password_hash,
            })
            .await?;

        info!(account_id = %account.id(), "Account registered");
        Ok(account)
    }

    pub async fn get(&self, id: AccountId) -> Result<Account, DomainError> {
        self.repository.get(id).await
    }

    pub async fn list(
        &self,
        page: PageRequest,
        name: Option<String>,
    ) -> Result<Vec<Account>, DomainError> {
        self.repository.list(page, name).await
    }

    /// Change name and email. Only the account owner may do this.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        id: AccountId,
        request: UpdateProfileRequest,
    ) -> Result<Account, DomainError> {
        gate::authorize_owner(ctx, id)?;

        let email = normalize_email(&request.email);

        validate_name(&request.name).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_email(&email).map_err(|e| DomainError::validation(e.to_string()))?;

        if let Some(owner) = self.email_owner(&email).await? {
            if owner != id {
                return Err(DomainError::conflict(MSG_EMAIL_REGISTERED));
            }
        }

        let mut account = self.repository.get(id).await?;
        account.set_name(request.name.trim());
        account.set_email(email);

        self.repository.update(&account).await
    }

    /// Change the password after checking the current one
    pub async fn update_password(
        &self,
        ctx: &RequestContext,
        id: AccountId,
        request: UpdatePasswordRequest,
    ) -> Result<Account, DomainError> {
        gate::authorize_owner(ctx, id)?;

        validate_password(&request.new_password)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        let mut account = self.repository.get(id).await?;

        if !self
            .hasher
            .verify(&request.old_password, account.password_hash())
        {
            return Err(DomainError::wrong_credential(MSG_WRONG_PASSWORD));
        }

        let new_hash = self.hasher.hash(&request.new_password)?;
        account.set_password_hash(new_hash);

        let account = self.repository.update(&account).await?;

        info!(account_id = %id, "Account password changed");
        Ok(account)
    }

    pub async fn delete(&self, ctx: &RequestContext, id: AccountId) -> Result<(), DomainError> {
        gate::authorize_owner(ctx, id)?;

        self.repository.delete(id).await?;

        info!(account_id = %id, "Account deleted");
        Ok(())
    }

    /// Id of the account registered under `email`, if any
    async fn email_owner(&self, email: &str) -> Result<Option<AccountId>, DomainError> {
        match self.repository.get_by_email(email).await {
            Ok(account) => Ok(Some(account.id())),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}
