//! Post persistence ports

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{NewPost, Post, PostId};
use crate::domain::pagination::PageRequest;
use crate::domain::DomainError;

/// Relational store for posts. Reads join the owning account row.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn insert(&self, post: &NewPost) -> Result<PostId, DomainError>;

    async fn find(&self, id: PostId) -> Result<Option<Post>, DomainError>;

    /// List posts ordered by id, optionally filtered by a case-insensitive title substring
    async fn list(
        &self,
        page: PageRequest,
        title: Option<String>,
    ) -> Result<Vec<Post>, DomainError>;

    /// Write title and body and stamp `updated_at`. Returns `NotFound` when no row matched.
    async fn update(&self, post: &Post) -> Result<(), DomainError>;

    /// Returns `NotFound` when no row matched.
    async fn delete(&self, id: PostId) -> Result<(), DomainError>;
}

/// Cache-aware post repository used by the services
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: NewPost) -> Result<Post, DomainError>;

    async fn get(&self, id: PostId) -> Result<Post, DomainError>;

    async fn list(
        &self,
        page: PageRequest,
        title: Option<String>,
    ) -> Result<Vec<Post>, DomainError>;

    async fn update(&self, post: &Post) -> Result<Post, DomainError>;

    async fn delete(&self, id: PostId) -> Result<(), DomainError>;
}
