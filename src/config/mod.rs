//! Layered application configuration

mod app_config;

pub use app_config::{
    AppConfig, AuthConfig, CacheSettings, DatabaseConfig, LogFormat, LoggingConfig,
    PaginationConfig, RateLimitSettings, ServerConfig,
};
