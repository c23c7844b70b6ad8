use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config;
use crate::database::DatabaseManager;

#[derive(Subcommand)]
pub enum DbCommands {
    #[command(about = "Create tables and indexes (idempotent)")]
    Init,

    #[command(about = "Check database connectivity")]
    Ping,
}

pub async fn handle(cmd: DbCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let database = &config::config().database;
    let pool = DatabaseManager::connect(database).await?;
    let target = match &database.url {
        Some(url) => DatabaseManager::redacted_url(url)?,
        None => String::new(),
    };

    match cmd {
        DbCommands::Init => {
            DatabaseManager::apply_schema(&pool).await?;
            output_success(
                output_format,
                &format!("Schema applied to {}", target),
                Some(json!({ "database": target })),
            )
        }
        DbCommands::Ping => {
            DatabaseManager::health_check(&pool).await?;
            output_success(
                output_format,
                &format!("Database reachable at {}", target),
                Some(json!({ "database": target })),
            )
        }
    }
}
