//! CLI module
//!
//! Subcommands:
//! - `serve`: run the HTTP API
//! - `migrate`: manage the database schema
//! - `launch`: apply pending migrations, then serve

pub mod launch;
pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Blog API - accounts, posts and token authentication
#[derive(Parser)]
#[command(name = "blog-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Apply or revert schema migrations
    Migrate(migrate::MigrateArgs),

    /// Apply pending migrations, then run the HTTP API server
    Launch,
}

/// Load `.env`, build the layered configuration and install logging
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["blog-api", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
    }

    #[test]
    fn test_parse_migrate_steps_negative() {
        let cli = Cli::try_parse_from(["blog-api", "migrate", "steps", "-2"]).unwrap();

        match cli.command {
            Command::Migrate(args) => {
                assert!(matches!(args.action, migrate::MigrateAction::Steps { n: -2 }))
            }
            _ => panic!("expected migrate"),
        }
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["blog-api", "seed"]).is_err());
    }
}
