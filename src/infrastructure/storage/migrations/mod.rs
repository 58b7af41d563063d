//! Database migrations infrastructure
//!
//! Migrations are embedded in the binary and tracked in the `_migrations` table.

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use sqlx::Executor;
use tracing::info;

use crate::domain::DomainError;

/// Schema migration operations exposed on the command line
#[async_trait]
pub trait Migrator: Send + Sync {
    /// Applies every pending migration. Returns how many were applied.
    async fn up(&self) -> Result<usize, DomainError>;

    /// Reverts every applied migration. Returns how many were reverted.
    async fn down(&self) -> Result<usize, DomainError>;

    /// Applies `n` pending migrations when positive, reverts `-n` when negative
    async fn steps(&self, n: i32) -> Result<usize, DomainError>;

    /// Drops every table, bookkeeping included
    async fn drop_all(&self) -> Result<(), DomainError>;

    /// Returns the latest applied migration version
    async fn version(&self) -> Result<Option<i64>, DomainError>;
}

/// Represents a database migration
#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i64,
    pub description: String,
    /// SQL to run when applying the migration
    pub up: String,
    /// SQL to run when reverting the migration
    pub down: String,
}

impl Migration {
    pub fn new(
        version: i64,
        description: impl Into<String>,
        up: impl Into<String>,
        down: impl Into<String>,
    ) -> Self {
        Self {
            version,
            description: description.into(),
            up: up.into(),
            down: down.into(),
        }
    }
}

/// Schema for accounts and posts, in application order
pub fn schema_migrations() -> Vec<Migration> {
    vec![
        Migration::new(
            1,
            "Create account table",
            r#"
            CREATE TABLE IF NOT EXISTS account (
                id BIGSERIAL PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                email VARCHAR(255) NOT NULL UNIQUE,
                password VARCHAR(255) NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NULL
            );
            "#,
            r#"
            DROP TABLE IF EXISTS account;
            "#,
        ),
        Migration::new(
            2,
            "Create post table",
            r#"
            CREATE TABLE IF NOT EXISTS post (
                id BIGSERIAL PRIMARY KEY,
                title VARCHAR(255) NOT NULL,
                body TEXT NOT NULL,
                account_id BIGINT NOT NULL REFERENCES account(id),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NULL
            );
            CREATE INDEX IF NOT EXISTS idx_post_account_id ON post(account_id);
            "#,
            r#"
            DROP TABLE IF EXISTS post;
            "#,
        ),
    ]
}

/// Split `migrations` into the ones still to apply, in ascending order
fn pending<'a>(migrations: &'a [Migration], applied: &[i64]) -> Vec<&'a Migration> {
    let mut pending: Vec<_> = migrations
        .iter()
        .filter(|m| !applied.contains(&m.version))
        .collect();
    pending.sort_by_key(|m| m.version);
    pending
}

/// Applied migrations, newest first
fn applied_desc<'a>(migrations: &'a [Migration], applied: &[i64]) -> Vec<&'a Migration> {
    let mut done: Vec<_> = migrations
        .iter()
        .filter(|m| applied.contains(&m.version))
        .collect();
    done.sort_by_key(|m| std::cmp::Reverse(m.version));
    done
}

/// PostgreSQL migrator over an embedded migration list
#[derive(Debug)]
pub struct PostgresMigrator {
    pool: PgPool,
    migrations: Vec<Migration>,
}

impl PostgresMigrator {
    pub fn new(pool: PgPool) -> Self {
        Self::with_migrations(pool, schema_migrations())
    }

    pub fn with_migrations(pool: PgPool, migrations: Vec<Migration>) -> Self {
        Self { pool, migrations }
    }

    /// Creates the migrations table if it doesn't exist
    async fn ensure_migrations_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version BIGINT PRIMARY KEY,
                description TEXT NOT NULL,
                installed_on TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create migrations table: {}", e)))?;

        Ok(())
    }

    /// Applies one migration and records it in the same transaction
    async fn apply(&self, migration: &Migration) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::storage(format!("Failed to begin migration transaction: {}", e))
        })?;

        tx.execute(sqlx::raw_sql(&migration.up))
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to run migration {}: {}",
                    migration.version, e
                ))
            })?;

        sqlx::query("INSERT INTO _migrations (version, description) VALUES ($1, $2)")
            .bind(migration.version)
            .bind(&migration.description)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to record migration {}: {}",
                    migration.version, e
                ))
            })?;

        tx.commit().await.map_err(|e| {
            DomainError::storage(format!("Failed to commit migration {}: {}", migration.version, e))
        })?;

        info!(version = migration.version, "Applied migration: {}", migration.description);
        Ok(())
    }

    /// Reverts one migration and removes its record in the same transaction
    async fn revert(&self, migration: &Migration) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::storage(format!("Failed to begin migration transaction: {}", e))
        })?;

        tx.execute(sqlx::raw_sql(&migration.down))
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to revert migration {}: {}",
                    migration.version, e
                ))
            })?;

        sqlx::query("DELETE FROM _migrations WHERE version = $1")
            .bind(migration.version)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::storage(format!(
                    "Failed to remove migration record {}: {}",
                    migration.version, e
                ))
            })?;

        tx.commit().await.map_err(|e| {
            DomainError::storage(format!("Failed to commit revert {}: {}", migration.version, e))
        })?;

        info!(version = migration.version, "Reverted migration: {}", migration.description);
        Ok(())
    }

    /// Returns all applied migration versions
    pub async fn applied_versions(&self) -> Result<Vec<i64>, DomainError> {
        self.ensure_migrations_table().await?;

        sqlx::query_scalar("SELECT version FROM _migrations ORDER BY version")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get applied migrations: {}", e)))
    }

    async fn apply_pending(&self, limit: usize) -> Result<usize, DomainError> {
        let applied = self.applied_versions().await?;
        let todo = pending(&self.migrations, &applied);
        let mut count = 0;

        for migration in todo.into_iter().take(limit) {
            self.apply(migration).await?;
            count += 1;
        }

        Ok(count)
    }

    async fn revert_applied(&self, limit: usize) -> Result<usize, DomainError> {
        let applied = self.applied_versions().await?;
        let todo = applied_desc(&self.migrations, &applied);
        let mut count = 0;

        for migration in todo.into_iter().take(limit) {
            self.revert(migration).await?;
            count += 1;
        }

        Ok(count)
    }
}

#[async_trait]
impl Migrator for PostgresMigrator {
    async fn up(&self) -> Result<usize, DomainError> {
        self.apply_pending(usize::MAX).await
    }

    async fn down(&self) -> Result<usize, DomainError> {
        self.revert_applied(usize::MAX).await
    }

    async fn steps(&self, n: i32) -> Result<usize, DomainError> {
        match n {
            0 => Ok(0),
            n if n > 0 => self.apply_pending(n.unsigned_abs() as usize).await,
            n => self.revert_applied(n.unsigned_abs() as usize).await,
        }
    }

    async fn drop_all(&self) -> Result<(), DomainError> {
        sqlx::raw_sql("DROP TABLE IF EXISTS post, account, _migrations CASCADE")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to drop tables: {}", e)))?;

        info!("Dropped all tables");
        Ok(())
    }

    async fn version(&self) -> Result<Option<i64>, DomainError> {
        self.ensure_migrations_table().await?;

        sqlx::query_scalar("SELECT MAX(version) FROM _migrations")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get migration version: {}", e)))
    }
}
