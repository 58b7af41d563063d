//! Application state for shared services

use std::sync::Arc;

use crate::config::PaginationConfig;
use crate::domain::account::AccountRepository;
use crate::domain::auth::{PasswordHasher, TokenService};
use crate::domain::post::PostRepository;
use crate::domain::{
    Account, AccountId, DomainError, HealthIndicator, IssuedToken, PageRequest, Post, PostId,
    RequestContext,
};
use crate::infrastructure::account::{
    AccountService, RegisterAccountRequest, UpdatePasswordRequest, UpdateProfileRequest,
};
use crate::infrastructure::auth::AuthService;
use crate::infrastructure::post::{PostContentRequest, PostService};
use crate::infrastructure::rate_limiter::RateLimiter;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServiceTrait>,
    pub post_service: Arc<dyn PostServiceTrait>,
    pub auth_service: Arc<dyn AuthServiceTrait>,
    /// Verifies bearer tokens before any protected handler runs
    pub token_service: Arc<dyn TokenService>,
    pub pagination: PaginationConfig,
    pub rate_limiter: Option<Arc<RateLimiter>>,
    /// Dependencies probed by `/ready`
    pub health_indicators: Vec<Arc<dyn HealthIndicator>>,
}

/// Trait for account service operations
#[async_trait::async_trait]
pub trait AccountServiceTrait: Send + Sync {
    async fn register(&self, request: RegisterAccountRequest) -> Result<Account, DomainError>;
    async fn get(&self, id: AccountId) -> Result<Account, DomainError>;
    async fn list(
        &self,
        page: PageRequest,
        name: Option<String>,
    ) -> Result<Vec<Account>, DomainError>;
    async fn update_profile(
        &self,
        ctx: &RequestContext,
        id: AccountId,
        request: UpdateProfileRequest,
    ) -> Result<Account, DomainError>;
    async fn update_password(
        &self,
        ctx: &RequestContext,
        id: AccountId,
        request: UpdatePasswordRequest,
    ) -> Result<Account, DomainError>;
    async fn delete(&self, ctx: &RequestContext, id: AccountId) -> Result<(), DomainError>;
}

/// Trait for post service operations
#[async_trait::async_trait]
pub trait PostServiceTrait: Send + Sync {
    async fn create(
        &self,
        ctx: &RequestContext,
        request: PostContentRequest,
    ) -> Result<Post, DomainError>;
    async fn get(&self, id: PostId) -> Result<Post, DomainError>;
    async fn list(&self, page: PageRequest, title: Option<String>)
        -> Result<Vec<Post>, DomainError>;
    async fn update(
        &self,
        ctx: &RequestContext,
        id: PostId,
        request: PostContentRequest,
    ) -> Result<Post, DomainError>;
    async fn delete(&self, ctx: &RequestContext, id: PostId) -> Result<(), DomainError>;
}

/// Trait for login
#[async_trait::async_trait]
pub trait AuthServiceTrait: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, DomainError>;
}

#[async_trait::async_trait]
impl<R, H> AccountServiceTrait for AccountService<R, H>
where
    R: AccountRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn register(&self, request: RegisterAccountRequest) -> Result<Account, DomainError> {
        AccountService::register(self, request).await
    }

    async fn get(&self, id: AccountId) -> Result<Account, DomainError> {
        AccountService::get(self, id).await
    }

    async fn list(
        &self,
        page: PageRequest,
        name: Option<String>,
    ) -> Result<Vec<Account>, DomainError> {
        AccountService::list(self, page, name).await
    }

    async fn update_profile(
        &self,
        ctx: &RequestContext,
        id: AccountId,
        request: UpdateProfileRequest,
    ) -> Result<Account, DomainError> {
        AccountService::update_profile(self, ctx, id, request).await
    }

    async fn update_password(
        &self,
        ctx: &RequestContext,
        id: AccountId,
        request: UpdatePasswordRequest,
    ) -> Result<Account, DomainError> {
        AccountService::update_password(self, ctx, id, request).await
    }

    async fn delete(&self, ctx: &RequestContext, id: AccountId) -> Result<(), DomainError> {
        AccountService::delete(self, ctx, id).await
    }
}

#[async_trait::async_trait]
impl<R: PostRepository + 'static> PostServiceTrait for PostService<R> {
    async fn create(
        &self,
        ctx: &RequestContext,
        request: PostContentRequest,
    ) -> Result<Post, DomainError> {
        PostService::create(self, ctx, request).await
    }

    async fn get(&self, id: PostId) -> Result<Post, DomainError> {
        PostService::get(self, id).await
    }

    async fn list(
        &self,
        page: PageRequest,
        title: Option<String>,
    ) -> Result<Vec<Post>, DomainError> {
        PostService::list(self, page, title).await
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: PostId,
        request: PostContentRequest,
    ) -> Result<Post, DomainError> {
        PostService::update(self, ctx, id, request).await
    }

    async fn delete(&self, ctx: &RequestContext, id: PostId) -> Result<(), DomainError> {
        PostService::delete(self, ctx, id).await
    }
}

#[async_trait::async_trait]
impl<R, H, T> AuthServiceTrait for AuthService<R, H, T>
where
    R: AccountRepository + 'static,
    H: PasswordHasher + 'static,
    T: TokenService + 'static,
{
    async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, DomainError> {
        AuthService::login(self, email, password).await
    }
}
