//! Blog API
//!
//! Accounts and posts over a relational store, with:
//! - A read-through cache (Redis or in-process) in front of every lookup by id or email
//! - Argon2 password hashing and HS256 identity tokens
//! - Ownership checks on every mutation

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::HealthIndicator;
use infrastructure::{
    account::{AccountService, CachedAccountRepository},
    auth::{Argon2Hasher, AuthService, JwtService},
    cache::{CacheFactory, CacheHandle},
    post::{CachedPostRepository, PostService},
    rate_limiter::RateLimiter,
    storage::{StorageFactory, Stores},
};
use tracing::{info, warn};

/// Create the application state from configuration, connecting to the configured backends
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config = config.database.storage_config()?;
    info!(backend = %storage_config.storage_type(), "Initializing storage");
    let stores = StorageFactory::create(&storage_config).await?;

    let cache_config = config.cache.cache_config()?;
    info!(backend = %cache_config.cache_type, "Initializing cache");
    let cache = CacheFactory::new().create(&cache_config).await?;

    Ok(build_app_state(stores, cache, config))
}

/// Wire services over already-constructed stores and cache
pub fn build_app_state(stores: Stores, cache: CacheHandle, config: &AppConfig) -> AppState {
    let ttl = config.cache.ttl();

    let jwt_config = config.auth.jwt_config();

    if jwt_config.uses_dev_secret() {
        warn!("Using the built-in development JWT secret; set APP_AUTH__JWT_SECRET in production");
    }

    let hasher = Arc::new(Argon2Hasher::new());
    let tokens = Arc::new(JwtService::new(jwt_config));

    let accounts = Arc::new(CachedAccountRepository::new(
        stores.accounts,
        cache.cache.clone(),
        ttl,
    ));
    let posts = Arc::new(CachedPostRepository::new(
        stores.posts,
        accounts.clone(),
        cache.cache,
        ttl,
    ));

    let account_service = AccountService::new(accounts.clone(), hasher.clone());
    let post_service = PostService::new(posts);
    let auth_service = AuthService::new(accounts, hasher, tokens.clone());

    let rate_limiter = config
        .rate_limit
        .enabled
        .then(|| Arc::new(RateLimiter::new(config.rate_limit.limiter_config())));

    let health_indicators: Vec<Arc<dyn HealthIndicator>> = vec![stores.health, cache.health];

    AppState {
        account_service: Arc::new(account_service),
        post_service: Arc::new(post_service),
        auth_service: Arc::new(auth_service),
        token_service: tokens,
        pagination: config.pagination,
        rate_limiter,
        health_indicators,
    }
}
