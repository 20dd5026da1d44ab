pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::app::AppState;
use crate::config::AppConfig;
use crate::database::{DatabaseManager, PgStore};

#[derive(Parser)]
#[command(name = "studyplan")]
#[command(about = "Study Planner CLI - entitlement and admin tooling against the managed store")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Evaluate a user's entitlement (downgrades an expired trial)")]
    Entitlement(commands::entitlement::EntitlementArgs),

    #[command(about = "Admin authorization checks")]
    Admin {
        #[command(subcommand)]
        cmd: commands::admin::AdminCommands,
    },

    #[command(about = "Mint a session token for local testing")]
    Token(commands::token::TokenArgs),

    #[command(about = "Apply database migrations")]
    Migrate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Entitlement(args) => commands::entitlement::handle(args, config, output_format).await,
        Commands::Admin { cmd } => commands::admin::handle(cmd, config, output_format).await,
        Commands::Token(args) => commands::token::handle(args, config, output_format),
        Commands::Migrate => commands::migrate::handle(config, output_format).await,
    }
}

/// Application state over the configured Postgres store
pub(crate) async fn connect_state(config: AppConfig) -> anyhow::Result<AppState> {
    let pool = DatabaseManager::connect(&config.database).await?;
    Ok(AppState::new(config, Arc::new(PgStore::new(pool))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_entitlement_with_json_flag() {
        let cli = Cli::parse_from([
            "studyplan",
            "--json",
            "entitlement",
            "4b0d7d4c-8a3f-4c4e-9f6c-2d1d5f0c9a11",
            "--email",
            "student@example.com",
        ]);
        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Entitlement(_)));
    }
}
