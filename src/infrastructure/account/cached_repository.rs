//! Read-through cached account repository

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::account::{Account, AccountId, AccountRepository, AccountStore, NewAccount};
use crate::domain::cache::{Cache, CacheExt, CacheKey};
use crate::domain::pagination::PageRequest;
use crate::domain::DomainError;

/// Account repository combining a relational store with a cache.
///
/// The store is ground truth. Writes hit the store first, then drop every cache key that may
/// hold the row, then re-read through `get`.
pub struct CachedAccountRepository {
    store: Arc<dyn AccountStore>,
    cache: Arc<dyn Cache>,
    ttl: Duration,
}

impl CachedAccountRepository {
    pub fn new(store: Arc<dyn AccountStore>, cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        Self { store, cache, ttl }
    }

    async fn read_through<F>(&self, key: CacheKey, load: F) -> Result<Account, DomainError>
    where
        F: std::future::Future<Output = Result<Option<Account>, DomainError>> + Send,
    {
        let key = key.to_string();

        if let Some(account) = self.cache.get::<Account>(&key).await? {
            debug!(key = %key, "Account cache hit");
            return Ok(account);
        }

        let account = load.await?.ok_or_else(DomainError::account_not_found)?;
        self.cache.set(&key, &account, self.ttl).await?;

        Ok(account)
    }

    async fn invalidate(&self, id: AccountId, emails: &[&str]) -> Result<(), DomainError> {
        self.cache.delete(&CacheKey::account(id).to_string()).await?;

        for email in emails {
            self.cache
                .delete(&CacheKey::account_email(*email).to_string())
                .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl AccountRepository for CachedAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, DomainError> {
        let id = self.store.insert(&account).await?;
        self.get(id).await
    }

    async fn get(&self, id: AccountId) -> Result<Account, DomainError> {
        self.read_through(CacheKey::account(id), self.store.find(id))
            .await
    }

    async fn get_by_email(&self, email: &str) -> Result<Account, DomainError> {
        self.read_through(CacheKey::account_email(email), self.store.find_by_email(email))
            .await
    }

    async fn list(
        &self,
        page: PageRequest,
        name: Option<String>,
    ) -> Result<Vec<Account>, DomainError> {
        self.store.list(page, name).await
    }

    async fn update(&self, account: &Account) -> Result<Account, DomainError> {
        let previous = self
            .store
            .find(account.id())
            .await?
            .ok_or_else(DomainError::account_not_found)?;

        self.store.update(account).await?;

        let mut emails = vec![account.email()];
        if previous.email() != account.email() {
            emails.push(previous.email());
        }
        self.invalidate(account.id(), &emails).await?;

        self.get(account.id()).await
    }

    async fn delete(&self, id: AccountId) -> Result<(), DomainError> {
        let existing = self
            .store
            .find(id)
            .await?
            .ok_or_else(DomainError::account_not_found)?;

        self.store.delete(id).await?;
        self.invalidate(id, &[existing.email()]).await
    }
}
