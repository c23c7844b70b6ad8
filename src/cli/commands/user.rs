use anyhow::{bail, Context};
use clap::Subcommand;
use serde_json::json;

use crate::auth::password::hash_password_blocking;
use crate::cli::utils::{output_fields, output_success};
use crate::cli::OutputFormat;
use crate::config;
use crate::database::models::NewUser;
use crate::database::DatabaseManager;
use crate::store::{EntityStore, PgStore};

#[derive(Subcommand)]
pub enum UserCommands {
    #[command(about = "Create a user account")]
    Create {
        #[arg(long, help = "Login email")]
        email: String,

        #[arg(long, help = "Plain-text password (hashed before storage)")]
        password: String,

        #[arg(long, help = "Grant superuser")]
        superuser: bool,

        #[arg(long, help = "Create the account disabled")]
        inactive: bool,
    },
}

pub async fn handle(cmd: UserCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        UserCommands::Create { email, password, superuser, inactive } => {
            if !email.contains('@') {
                bail!("'{}' is not an email address", email);
            }

            let hashed_password = hash_password_blocking(password).await?;

            let pool = DatabaseManager::connect(&config::config().database).await?;
            let store = PgStore::new(pool);
            let mut session = store.begin().await?;

            if session.find_user_by_email(&email).await?.is_some() {
                bail!("user {} already exists", email);
            }
            let user = session
                .insert_user(NewUser {
                    email,
                    hashed_password,
                    is_active: !inactive,
                    is_superuser: superuser,
                })
                .await
                .context("failed to insert user")?;
            session.commit().await?;

            output_fields(
                output_format,
                &[
                    ("id", user.id.to_string()),
                    ("email", user.email.clone()),
                    ("active", user.is_active.to_string()),
                    ("superuser", user.is_superuser.to_string()),
                ],
            );
            output_success(output_format, "User created", Some(json!({ "user": user })))
        }
    }
}
