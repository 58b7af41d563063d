//! Readiness probe for the cache backend

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::cache::Cache;
use crate::domain::health::HealthIndicator;
use crate::domain::DomainError;

use super::redis::RedisCache;

const PROBE_KEY: &str = "health:probe";

enum Probe {
    Redis(RedisCache),
    RoundTrip(Arc<dyn Cache>),
}

pub struct CacheHealth {
    probe: Probe,
}

impl CacheHealth {
    pub fn redis(cache: RedisCache) -> Self {
        Self {
            probe: Probe::Redis(cache),
        }
    }

    /// Probe any cache by writing and removing a throwaway key
    pub fn probe(cache: Arc<dyn Cache>) -> Self {
        Self {
            probe: Probe::RoundTrip(cache),
        }
    }
}

#[async_trait]
impl HealthIndicator for CacheHealth {
    fn name(&self) -> &str {
        "cache"
    }

    async fn check(&self) -> Result<(), DomainError> {
        match &self.probe {
            Probe::Redis(redis) => redis.ping().await,
            Probe::RoundTrip(cache) => {
                cache
                    .set_raw(PROBE_KEY, "1", Duration::from_secs(1))
                    .await?;
                cache.delete(PROBE_KEY).await?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::MockCache;

    #[tokio::test]
    async fn test_round_trip_probe_healthy() {
        let health = CacheHealth::probe(Arc::new(MockCache::new()));

        assert_eq!(health.name(), "cache");
        assert!(health.check().await.is_ok());
    }

    #[tokio::test]
    async fn test_round_trip_probe_reports_failure() {
        let health = CacheHealth::probe(Arc::new(MockCache::new().with_error("down")));

        assert!(matches!(
            health.check().await,
            Err(DomainError::Cache { .. })
        ));
    }
}
