//! Cache infrastructure - Cache implementations

mod factory;
mod health;
mod in_memory;
mod redis;

pub use factory::{CacheConfig, CacheFactory, CacheHandle, CacheType};
pub use health::CacheHealth;
pub use in_memory::{InMemoryCache, InMemoryCacheConfig};
pub use redis::{RedisCache, RedisCacheConfig};
