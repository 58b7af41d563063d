//! Migrate command - manages the Postgres schema

use anyhow::Context;
use clap::{Args, Subcommand};
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::storage::{connect_pool, Migrator, PostgresMigrator};

#[derive(Args, Clone, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

#[derive(Subcommand, Clone, Debug)]
pub enum MigrateAction {
    /// Apply every pending migration
    Up,
    /// Revert every applied migration
    Down,
    /// Apply N pending migrations, or revert N when negative
    Steps {
        #[arg(allow_negative_numbers = true)]
        n: i32,
    },
    /// Drop every table, including migration bookkeeping
    Drop,
    /// Print the current schema version
    Version,
}

pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let migrator = connect_migrator(&config).await?;

    execute(&migrator, &args.action).await
}

pub(crate) async fn connect_migrator(config: &AppConfig) -> anyhow::Result<PostgresMigrator> {
    let pool = connect_pool(&config.database.postgres_config())
        .await
        .context("Failed to connect to the database for migrations")?;

    Ok(PostgresMigrator::new(pool))
}

async fn execute(migrator: &dyn Migrator, action: &MigrateAction) -> anyhow::Result<()> {
    match action {
        MigrateAction::Up => {
            let applied = migrator.up().await?;
            info!(applied, "Migrations applied");
        }
        MigrateAction::Down => {
            let reverted = migrator.down().await?;
            info!(reverted, "Migrations reverted");
        }
        MigrateAction::Steps { n } => {
            let changed = migrator.steps(*n).await?;
            info!(steps = n, changed, "Migration steps executed");
        }
        MigrateAction::Drop => {
            migrator.drop_all().await?;
            info!("All tables dropped");
        }
        MigrateAction::Version => match migrator.version().await? {
            Some(version) => println!("{}", version),
            None => println!("no migrations applied"),
        },
    }

    Ok(())
}
