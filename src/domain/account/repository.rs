//! Account persistence ports

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{Account, AccountId, NewAccount};
use crate::domain::pagination::PageRequest;
use crate::domain::DomainError;

/// Relational store for accounts. The store is ground truth; it knows nothing about caching.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a row and return the generated id
    async fn insert(&self, account: &NewAccount) -> Result<AccountId, DomainError>;

    async fn find(&self, id: AccountId) -> Result<Option<Account>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// List accounts ordered by id, optionally filtered by a case-insensitive name substring
    async fn list(
        &self,
        page: PageRequest,
        name: Option<String>,
    ) -> Result<Vec<Account>, DomainError>;

    /// Write all mutable columns and stamp `updated_at`.
    ///
    /// Returns `NotFound` when no row matched.
    async fn update(&self, account: &Account) -> Result<(), DomainError>;

    /// Returns `NotFound` when no row matched.
    async fn delete(&self, id: AccountId) -> Result<(), DomainError>;
}

/// Account repository used by the services.
///
/// Reads go through the cache, writes go to the store and invalidate every cache entry that
/// may hold the row. Absent rows are reported as `NotFound`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn create(&self, account: NewAccount) -> Result<Account, DomainError>;

    async fn get(&self, id: AccountId) -> Result<Account, DomainError>;

    async fn get_by_email(&self, email: &str) -> Result<Account, DomainError>;

    async fn list(
        &self,
        page: PageRequest,
        name: Option<String>,
    ) -> Result<Vec<Account>, DomainError>;

    async fn update(&self, account: &Account) -> Result<Account, DomainError>;

    async fn delete(&self, id: AccountId) -> Result<(), DomainError>;
}
