//! Infrastructure layer - External service implementations

pub mod account;
pub mod auth;
pub mod cache;
pub mod logging;
pub mod post;
pub mod rate_limiter;
pub mod storage;
