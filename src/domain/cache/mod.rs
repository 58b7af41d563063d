//! Cache domain - key-value caching abstraction

mod key;
mod repository;

pub use key::CacheKey;
pub use repository::{Cache, CacheExt};

#[cfg(test)]
pub use repository::mock::{CacheOp, MockCache};
