//! Domain layer - Core business logic and entities

pub mod account;
pub mod auth;
pub mod cache;
pub mod error;
pub mod health;
pub mod pagination;
pub mod post;

pub use account::{Account, AccountId, AccountRepository, AccountStore, NewAccount};
pub use auth::{Caller, IssuedToken, PasswordHasher, RequestContext, TokenService};
pub use cache::{Cache, CacheExt, CacheKey};
pub use error::DomainError;
pub use health::HealthIndicator;
pub use pagination::PageRequest;
pub use post::{Author, NewPost, Post, PostId, PostRepository, PostStore};
