//! Read-through cached post repository

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::account::AccountRepository;
use crate::domain::cache::{Cache, CacheExt, CacheKey};
use crate::domain::pagination::PageRequest;
use crate::domain::post::{Author, NewPost, Post, PostId, PostRepository, PostStore};
use crate::domain::DomainError;

/// Post repository combining a relational store with a cache.
///
/// A cached post carries an author snapshot. On a cache hit the author is re-read through the
/// account repository so profile changes show up without touching post entries.
pub struct CachedPostRepository {
    store: Arc<dyn PostStore>,
    accounts: Arc<dyn AccountRepository>,
    cache: Arc<dyn Cache>,
    ttl: Duration,
}

impl CachedPostRepository {
    pub fn new(
        store: Arc<dyn PostStore>,
        accounts: Arc<dyn AccountRepository>,
        cache: Arc<dyn Cache>,
        ttl: Duration,
    ) -> Self {
        Self {
            store,
            accounts,
            cache,
            ttl,
        }
    }

    async fn refresh_author(&self, key: &str, post: Post) -> Result<Post, DomainError> {
        match self.accounts.get(post.account_id()).await {
            Ok(account) => Ok(post.with_author(Author::from(&account))),
            Err(e) if e.is_not_found() => {
                self.cache.delete(key).await?;
                Err(DomainError::post_not_found())
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl PostRepository for CachedPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, DomainError> {
        let id = self.store.insert(&post).await?;
        self.get(id).await
    }

    async fn get(&self, id: PostId) -> Result<Post, DomainError> {
        let key = CacheKey::post(id).to_string();

        if let Some(post) = self.cache.get::<Post>(&key).await? {
            debug!(key = %key, "Post cache hit");
            return self.refresh_author(&key, post).await;
        }

        let post = self
            .store
            .find(id)
            .await?
            .ok_or_else(DomainError::post_not_found)?;
        self.cache.set(&key, &post, self.ttl).await?;

        Ok(post)
    }

    async fn list(
        &self,
        page: PageRequest,
        title: Option<String>,
    ) -> Result<Vec<Post>, DomainError> {
        self.store.list(page, title).await
    }

    async fn update(&self, post: &Post) -> Result<Post, DomainError> {
        self.store.update(post).await?;
        self.cache.delete(&CacheKey::post(post.id()).to_string()).await?;

        self.get(post.id()).await
    }

    async fn delete(&self, id: PostId) -> Result<(), DomainError> {
        self.store.delete(id).await?;
        self.cache.delete(&CacheKey::post(id).to_string()).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::{AccountId, AccountStore, NewAccount};
    use crate::domain::cache::{CacheOp, MockCache};
    use crate::infrastructure::account::CachedAccountRepository;
    use crate::infrastructure::storage::InMemoryDatabase;

    struct Fixture {
        repo: CachedPostRepository,
        accounts: Arc<CachedAccountRepository>,
        cache: Arc<MockCache>,
        author: AccountId,
    }

    async fn setup() -> Fixture {
        let db = InMemoryDatabase::new();
        let cache = Arc::new(MockCache::new());
        let ttl = Duration::from_secs(60);

        let author = db
            .account_store()
            .insert(&NewAccount {
                name: "Alice".to_string(),
                email: "a@x.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();

        let accounts = Arc::new(CachedAccountRepository::new(
            Arc::new(db.account_store()),
            cache.clone(),
            ttl,
        ));
        let repo = CachedPostRepository::new(
            Arc::new(db.post_store()),
            accounts.clone(),
            cache.clone(),
            ttl,
        );

        Fixture {
            repo,
            accounts,
            cache,
            author,
        }
    }

    fn new_post(author: AccountId) -> NewPost {
        NewPost {
            title: "Hello".to_string(),
            body: "World".to_string(),
            account_id: author,
        }
    }

    #[tokio::test]
    async fn test_create_returns_joined_post() {
        let f = setup().await;

        let post = f.repo.create(new_post(f.author)).await.unwrap();

        assert_eq!(post.id().value(), 1);
        assert_eq!(post.account_id(), f.author);
        assert_eq!(post.author().name, "Alice");
        assert!(post.updated_at().is_none());
        assert!(f.cache.contains("post:1"));
    }

    #[tokio::test]
    async fn test_cache_hit_sees_renamed_author() {
        let f = setup().await;
        let post = f.repo.create(new_post(f.author)).await.unwrap();

        let mut account = f.accounts.get(f.author).await.unwrap();
        account.set_name("Alicia");
        f.accounts.update(&account).await.unwrap();

        let cached = f.repo.get(post.id()).await.unwrap();

        assert_eq!(cached.author().name, "Alicia");
    }

    #[tokio::test]
    async fn test_update_invalidates_before_refetch() {
        let f = setup().await;
        let mut post = f.repo.create(new_post(f.author)).await.unwrap();
        f.cache.clear_ops();

        post.set_title("Edited");
        let updated = f.repo.update(&post).await.unwrap();

        assert_eq!(updated.title(), "Edited");
        assert!(updated.updated_at().is_some());

        let ops = f.cache.ops();
        assert_eq!(ops[0], CacheOp::Delete("post:1".to_string()));
        assert_eq!(ops[1], CacheOp::Get("post:1".to_string()));

        let again = f.repo.get(post.id()).await.unwrap();
        assert_eq!(again.title(), "Edited");
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let f = setup().await;
        let post = f.repo.create(new_post(f.author)).await.unwrap();

        f.repo.delete(post.id()).await.unwrap();

        assert!(!f.cache.contains("post:1"));
        assert!(f.repo.get(post.id()).await.unwrap_err().is_not_found());
        assert!(f.repo.delete(post.id()).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_missing_post_is_not_found() {
        let f = setup().await;
        let ghost = f.repo.create(new_post(f.author)).await.unwrap();
        f.repo.delete(ghost.id()).await.unwrap();

        let result = f.repo.update(&ghost).await;

        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_cache_error_propagates() {
        let f = setup().await;
        let post = f.repo.create(new_post(f.author)).await.unwrap();
        f.cache.set_error(Some("timeout".to_string()));

        let result = f.repo.get(post.id()).await;

        assert!(matches!(result, Err(DomainError::Cache { .. })));
    }
}
