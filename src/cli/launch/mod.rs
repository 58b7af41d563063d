//! Launch command - migrate, then serve

use tracing::info;

use crate::infrastructure::storage::{Migrator, StorageType};

pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    if config.database.storage_config()?.storage_type() == StorageType::Postgres {
        let migrator = super::migrate::connect_migrator(&config).await?;
        let applied = migrator.up().await?;
        info!(applied, "Pending migrations applied");
    } else {
        info!("In-memory database selected, skipping migrations");
    }

    super::serve::serve(&config).await
}
