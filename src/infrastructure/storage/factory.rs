//! Storage factory for runtime storage selection

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::account::AccountStore;
use crate::domain::health::HealthIndicator;
use crate::domain::post::PostStore;
use crate::domain::DomainError;

use super::in_memory::InMemoryDatabase;
use super::postgres::{connect_pool, PostgresConfig, PostgresHealth};
use super::postgres_store::{PostgresAccountStore, PostgresPostStore};

/// Supported storage types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl std::fmt::Display for StorageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageType::InMemory => write!(f, "in_memory"),
            StorageType::Postgres => write!(f, "postgres"),
        }
    }
}

impl std::str::FromStr for StorageType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err(DomainError::configuration(format!(
                "Unknown database backend: {}. Valid backends: postgres, in_memory",
                s
            ))),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    InMemory,
    Postgres(PostgresConfig),
}

impl StorageConfig {
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// Account and post stores over one backing database
pub struct Stores {
    pub accounts: Arc<dyn AccountStore>,
    pub posts: Arc<dyn PostStore>,
    pub health: Arc<dyn HealthIndicator>,
}

/// Factory for creating storage instances
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates the stores based on the configuration
    pub async fn create(config: &StorageConfig) -> Result<Stores, DomainError> {
        match config {
            StorageConfig::InMemory => Ok(Self::create_in_memory()),
            StorageConfig::Postgres(pg_config) => {
                let pool = connect_pool(pg_config).await?;

                Ok(Stores {
                    accounts: Arc::new(PostgresAccountStore::new(pool.clone())),
                    posts: Arc::new(PostgresPostStore::new(pool.clone())),
                    health: Arc::new(PostgresHealth::new(pool)),
                })
            }
        }
    }

    /// Creates stores over a fresh in-memory database
    pub fn create_in_memory() -> Stores {
        let db = InMemoryDatabase::new();

        Stores {
            accounts: Arc::new(db.account_store()),
            posts: Arc::new(db.post_store()),
            health: Arc::new(AlwaysHealthy),
        }
    }
}

/// The in-memory database cannot become unreachable
struct AlwaysHealthy;

#[async_trait]
impl HealthIndicator for AlwaysHealthy {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_type_from_str() {
        assert_eq!("memory".parse::<StorageType>().unwrap(), StorageType::InMemory);
        assert_eq!("in_memory".parse::<StorageType>().unwrap(), StorageType::InMemory);
        assert_eq!("postgres".parse::<StorageType>().unwrap(), StorageType::Postgres);
        assert_eq!("PG".parse::<StorageType>().unwrap(), StorageType::Postgres);
        assert!("mysql".parse::<StorageType>().is_err());
    }

    #[test]
    fn test_storage_config_types() {
        assert_eq!(StorageConfig::InMemory.storage_type(), StorageType::InMemory);
        assert_eq!(
            StorageConfig::Postgres(PostgresConfig::default()).storage_type(),
            StorageType::Postgres
        );
    }

    #[tokio::test]
    async fn test_in_memory_stores_share_tables() {
        use crate::domain::account::NewAccount;
        use crate::domain::post::NewPost;

        let stores = StorageFactory::create(&StorageConfig::InMemory).await.unwrap();

        let account_id = stores
            .accounts
            .insert(&NewAccount {
                name: "A".to_string(),
                email: "a@x.com".to_string(),
                password_hash: "h".to_string(),
            })
            .await
            .unwrap();

        let post_id = stores
            .posts
            .insert(&NewPost {
                title: "T".to_string(),
                body: "B".to_string(),
                account_id,
            })
            .await
            .unwrap();

        assert!(stores.posts.find(post_id).await.unwrap().is_some());
        assert!(stores.health.check().await.is_ok());
    }
}
