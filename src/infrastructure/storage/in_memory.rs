//! In-memory relational store
//!
//! Useful for testing and database-less runs. Data is lost when the process terminates.
//! Accounts and posts share one table set so that joins and foreign keys behave like Postgres.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::account::{Account, AccountId, AccountStore, NewAccount};
use crate::domain::error::{MSG_ACCOUNT_HAS_POSTS, MSG_EMAIL_REGISTERED};
use crate::domain::pagination::PageRequest;
use crate::domain::post::{Author, NewPost, Post, PostId, PostStore};
use crate::domain::DomainError;

#[derive(Debug, Clone)]
struct PostRow {
    id: i64,
    title: String,
    body: String,
    account_id: i64,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct Tables {
    accounts: BTreeMap<i64, Account>,
    posts: BTreeMap<i64, PostRow>,
    account_seq: i64,
    post_seq: i64,
}

impl Tables {
    fn join_author(&self, row: &PostRow) -> Option<Post> {
        let account = self.accounts.get(&row.account_id)?;

        Some(Post::restore(
            PostId::new(row.id),
            row.title.clone(),
            row.body.clone(),
            row.created_at,
            row.updated_at,
            Author::from(account),
        ))
    }

    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.accounts
            .values()
            .any(|a| a.email() == email && Some(a.id().value()) != except)
    }
}

/// Shared table set behind the in-memory account and post stores
#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account_store(&self) -> InMemoryAccountStore {
        InMemoryAccountStore { db: self.clone() }
    }

    pub fn post_store(&self) -> InMemoryPostStore {
        InMemoryPostStore { db: self.clone() }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, DomainError> {
        self.tables
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, DomainError> {
        self.tables
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))
    }
}

fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

fn window<T>(rows: impl Iterator<Item = T>, page: PageRequest) -> Vec<T> {
    rows.skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect()
}

#[derive(Debug, Clone)]
pub struct InMemoryAccountStore {
    db: InMemoryDatabase,
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn insert(&self, account: &NewAccount) -> Result<AccountId, DomainError> {
        let mut tables = self.db.write()?;

        if tables.email_taken(&account.email, None) {
            return Err(DomainError::conflict(MSG_EMAIL_REGISTERED));
        }

        tables.account_seq += 1;
        let id = AccountId::new(tables.account_seq);

        tables.accounts.insert(
            id.value(),
            Account::restore(
                id,
                account.name.clone(),
                account.email.clone(),
                account.password_hash.clone(),
                Utc::now(),
                None,
            ),
        );

        Ok(id)
    }

    async fn find(&self, id: AccountId) -> Result<Option<Account>, DomainError> {
        Ok(self.db.read()?.accounts.get(&id.value()).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        Ok(self
            .db
            .read()?
            .accounts
            .values()
            .find(|a| a.email() == email)
            .cloned())
    }

    async fn list(
        &self,
        page: PageRequest,
        name: Option<String>,
    ) -> Result<Vec<Account>, DomainError> {
        let tables = self.db.read()?;
        let matching = tables
            .accounts
            .values()
            .filter(|a| contains_ignore_case(a.name(), name.as_deref()))
            .cloned();

        Ok(window(matching, page))
    }

    async fn update(&self, account: &Account) -> Result<(), DomainError> {
        let mut tables = self.db.write()?;
        let id = account.id().value();

        let created_at = tables
            .accounts
            .get(&id)
            .map(Account::created_at)
            .ok_or_else(DomainError::account_not_found)?;

        if tables.email_taken(account.email(), Some(id)) {
            return Err(DomainError::conflict(MSG_EMAIL_REGISTERED));
        }

        let updated = Account::restore(
            account.id(),
            account.name(),
            account.email(),
            account.password_hash(),
            created_at,
            Some(Utc::now()),
        );
        tables.accounts.insert(id, updated);

        Ok(())
    }

    async fn delete(&self, id: AccountId) -> Result<(), DomainError> {
        let mut tables = self.db.write()?;

        if !tables.accounts.contains_key(&id.value()) {
            return Err(DomainError::account_not_found());
        }

        if tables.posts.values().any(|p| p.account_id == id.value()) {
            return Err(DomainError::conflict(MSG_ACCOUNT_HAS_POSTS));
        }

        tables.accounts.remove(&id.value());
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryPostStore {
    db: InMemoryDatabase,
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn insert(&self, post: &NewPost) -> Result<PostId, DomainError> {
        let mut tables = self.db.write()?;

        if !tables.accounts.contains_key(&post.account_id.value()) {
            return Err(DomainError::account_not_found());
        }

        tables.post_seq += 1;
        let id = tables.post_seq;

        tables.posts.insert(
            id,
            PostRow {
                id,
                title: post.title.clone(),
                body: post.body.clone(),
                account_id: post.account_id.value(),
                created_at: Utc::now(),
                updated_at: None,
            },
        );

        Ok(PostId::new(id))
    }

    async fn find(&self, id: PostId) -> Result<Option<Post>, DomainError> {
        let tables = self.db.read()?;

        Ok(tables
            .posts
            .get(&id.value())
            .and_then(|row| tables.join_author(row)))
    }

    async fn list(
        &self,
        page: PageRequest,
        title: Option<String>,
    ) -> Result<Vec<Post>, DomainError> {
        let tables = self.db.read()?;
        let matching = tables
            .posts
            .values()
            .filter(|row| contains_ignore_case(&row.title, title.as_deref()))
            .filter_map(|row| tables.join_author(row));

        Ok(window(matching, page))
    }

    async fn update(&self, post: &Post) -> Result<(), DomainError> {
        let mut tables = self.db.write()?;

        let row = tables
            .posts
            .get_mut(&post.id().value())
            .ok_or_else(DomainError::post_not_found)?;

        row.title = post.title().to_string();
        row.body = post.body().to_string();
        row.updated_at = Some(Utc::now());

        Ok(())
    }

    async fn delete(&self, id: PostId) -> Result<(), DomainError> {
        let mut tables = self.db.write()?;

        match tables.posts.remove(&id.value()) {
            Some(_) => Ok(()),
            None => Err(DomainError::post_not_found()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account(name: &str, email: &str) -> NewAccount {
        NewAccount {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    fn new_post(title: &str, account_id: AccountId) -> NewPost {
        NewPost {
            title: title.to_string(),
            body: "body".to_string(),
            account_id,
        }
    }

    fn page(limit: i64, offset: i64) -> PageRequest {
        PageRequest::new(Some(limit), Some(offset), 20, 50).unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let accounts = InMemoryDatabase::new().account_store();

        let first = accounts.insert(&new_account("A", "a@x.com")).await.unwrap();
        let second = accounts.insert(&new_account("B", "b@x.com")).await.unwrap();

        assert_eq!(first.value(), 1);
        assert_eq!(second.value(), 2);

        let stored = accounts.find(first).await.unwrap().unwrap();
        assert!(stored.updated_at().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let accounts = InMemoryDatabase::new().account_store();
        accounts.insert(&new_account("A", "a@x.com")).await.unwrap();

        let result = accounts.insert(&new_account("B", "a@x.com")).await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_update_stamps_updated_at() {
        let accounts = InMemoryDatabase::new().account_store();
        let id = accounts.insert(&new_account("A", "a@x.com")).await.unwrap();

        let mut account = accounts.find(id).await.unwrap().unwrap();
        account.set_name("Renamed");
        accounts.update(&account).await.unwrap();

        let stored = accounts.find(id).await.unwrap().unwrap();
        assert_eq!(stored.name(), "Renamed");
        assert!(stored.updated_at().is_some());
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_rows() {
        let db = InMemoryDatabase::new();
        let accounts = db.account_store();
        let posts = db.post_store();

        let ghost = Account::restore(AccountId::new(42), "G", "g@x.com", "h", Utc::now(), None);

        assert!(accounts.update(&ghost).await.unwrap_err().is_not_found());
        assert!(accounts.delete(AccountId::new(42)).await.unwrap_err().is_not_found());
        assert!(posts.delete(PostId::new(42)).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_list_filters_case_insensitively_and_paginates() {
        let accounts = InMemoryDatabase::new().account_store();

        for (name, email) in [("Alice", "a@x.com"), ("alicia", "b@x.com"), ("Bob", "c@x.com")] {
            accounts.insert(&new_account(name, email)).await.unwrap();
        }

        let all = accounts.list(page(50, 0), None).await.unwrap();
        assert_eq!(all.len(), 3);

        let filtered = accounts
            .list(page(50, 0), Some("ALI".to_string()))
            .await
            .unwrap();
        let names: Vec<_> = filtered.iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["Alice", "alicia"]);

        let second_page = accounts.list(page(1, 1), None).await.unwrap();
        assert_eq!(second_page.len(), 1);
        assert_eq!(second_page[0].name(), "alicia");

        let beyond = accounts.list(page(10, 10), None).await.unwrap();
        assert!(beyond.is_empty());
    }

    #[tokio::test]
    async fn test_post_reads_join_author() {
        let db = InMemoryDatabase::new();
        let account_id = db
            .account_store()
            .insert(&new_account("Alice", "a@x.com"))
            .await
            .unwrap();

        let posts = db.post_store();
        let id = posts.insert(&new_post("Hello", account_id)).await.unwrap();

        let post = posts.find(id).await.unwrap().unwrap();
        assert_eq!(post.account_id(), account_id);
        assert_eq!(post.author().name, "Alice");
    }

    #[tokio::test]
    async fn test_post_insert_requires_existing_account() {
        let posts = InMemoryDatabase::new().post_store();

        let result = posts.insert(&new_post("Orphan", AccountId::new(9))).await;

        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_account_with_posts_cannot_be_deleted() {
        let db = InMemoryDatabase::new();
        let accounts = db.account_store();
        let account_id = accounts.insert(&new_account("A", "a@x.com")).await.unwrap();
        let post_id = db
            .post_store()
            .insert(&new_post("Hello", account_id))
            .await
            .unwrap();

        let err = accounts.delete(account_id).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict { .. }));
        assert_eq!(err.to_string(), format!("Conflict: {}", MSG_ACCOUNT_HAS_POSTS));

        db.post_store().delete(post_id).await.unwrap();
        accounts.delete(account_id).await.unwrap();
        assert!(accounts.find(account_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_post_list_filters_by_title() {
        let db = InMemoryDatabase::new();
        let account_id = db
            .account_store()
            .insert(&new_account("A", "a@x.com"))
            .await
            .unwrap();
        let posts = db.post_store();

        posts.insert(&new_post("Rust tips", account_id)).await.unwrap();
        posts.insert(&new_post("Go tips", account_id)).await.unwrap();

        let rust = posts
            .list(page(20, 0), Some("rust".to_string()))
            .await
            .unwrap();
        assert_eq!(rust.len(), 1);
        assert_eq!(rust[0].title(), "Rust tips");
    }
}
