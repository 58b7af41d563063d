//! Post use cases

use std::sync::Arc;

use tracing::info;

use crate::domain::auth::{gate, RequestContext};
use crate::domain::pagination::PageRequest;
use crate::domain::post::{
    validate_body, validate_title, NewPost, Post, PostId, PostRepository,
};
use crate::domain::DomainError;

/// Request for creating or replacing a post's content
#[derive(Debug, Clone)]
pub struct PostContentRequest {
    pub title: String,
    pub body: String,
}

impl PostContentRequest {
    fn validate(&self) -> Result<(), DomainError> {
        validate_title(&self.title).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_body(&self.body).map_err(|e| DomainError::validation(e.to_string()))
    }
}

/// Post service
#[derive(Debug)]
pub struct PostService<R: PostRepository> {
    repository: Arc<R>,
}

impl<R: PostRepository> PostService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Any authenticated caller may post; the author is always the caller
    pub async fn create(
        &self,
        ctx: &RequestContext,
        request: PostContentRequest,
    ) -> Result<Post, DomainError> {
        let caller = gate::require_caller(ctx)?;
        request.validate()?;

        let post = self
            .repository
            .create(NewPost {
                title: request.title,
                body: request.body,
                account_id: caller.account_id(),
            })
            .await?;

        info!(post_id = %post.id(), account_id = %caller.account_id(), "Post created");
        Ok(post)
    }

    pub async fn get(&self, id: PostId) -> Result<Post, DomainError> {
        self.repository.get(id).await
    }

    pub async fn list(
        &self,
        page: PageRequest,
        title: Option<String>,
    ) -> Result<Vec<Post>, DomainError> {
        self.repository.list(page, title).await
    }

    /// Replace title and body. Ownership is checked against the stored post.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: PostId,
        request: PostContentRequest,
    ) -> Result<Post, DomainError> {
        let mut post = self.repository.get(id).await?;
        gate::authorize_owner(ctx, post.account_id())?;
        request.validate()?;

        post.set_title(request.title);
        post.set_body(request.body);

        self.repository.update(&post).await
    }

    pub async fn delete(&self, ctx: &RequestContext, id: PostId) -> Result<(), DomainError> {
        let post = self.repository.get(id).await?;
        gate::authorize_owner(ctx, post.account_id())?;

        self.repository.delete(id).await?;

        info!(post_id = %id, "Post deleted");
        Ok(())
    }
}
