//! Storage infrastructure - relational store implementations

mod factory;
mod in_memory;
pub mod migrations;
mod postgres;
mod postgres_store;

pub use factory::{StorageConfig, StorageFactory, StorageType, Stores};
pub use in_memory::{InMemoryAccountStore, InMemoryDatabase, InMemoryPostStore};
pub use migrations::{Migration, Migrator, PostgresMigrator};
pub use postgres::{connect_pool, PostgresConfig, PostgresHealth};
pub use postgres_store::{PostgresAccountStore, PostgresPostStore};
