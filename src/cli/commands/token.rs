use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::auth::JwtKeys;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config;

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Mint a bearer token for a user id")]
    Issue {
        #[arg(help = "User UUID")]
        user_id: Uuid,
    },
}

pub async fn handle(cmd: TokenCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        TokenCommands::Issue { user_id } => {
            let keys = JwtKeys::from_config(&config::config().security)?;
            let token = keys.issue(user_id)?;

            if output_format == OutputFormat::Text {
                println!("{}", token);
                return Ok(());
            }
            output_success(
                output_format,
                "Token issued",
                Some(json!({
                    "access_token": token,
                    "token_type": "bearer",
                    "expires_in": keys.lifetime_secs()
                })),
            )
        }
    }
}
