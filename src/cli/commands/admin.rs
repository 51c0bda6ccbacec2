use clap::Subcommand;
use serde_json::json;

use crate::auth::hash_password;
use crate::cli::utils::{output_field, output_success, prompt_line};
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::DatabaseManager;
use crate::services::AdminService;

#[derive(Subcommand)]
pub enum AdminCommands {
    #[command(about = "Create an admin account (works even when admins already exist)")]
    Create {
        #[arg(help = "Admin username")]
        username: String,

        #[arg(long, help = "Password (prompted on stdin when omitted)")]
        password: Option<String>,
    },

    #[command(about = "Print the Argon2 hash of a password")]
    HashPassword {
        #[arg(help = "Password to hash")]
        password: String,
    },
}

pub async fn handle(cmd: AdminCommands, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AdminCommands::Create { username, password } => {
            let password = match password {
                Some(p) => p,
                None => prompt_line("Password: ")?,
            };

            let pool = DatabaseManager::lazy_pool(&config.database)?;
            let admin = AdminService::new(pool)
                .create(&username, &password)
                .await?;

            output_success(
                &output_format,
                &format!("Admin '{}' created", admin.username),
                Some(json!({ "id": admin.id, "username": admin.username })),
            )?;
            output_field(&output_format, "id", admin.id);
            Ok(())
        }
        AdminCommands::HashPassword { password } => {
            let hash = hash_password(&password)?;
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&json!({ "hash": hash }))?),
                OutputFormat::Text => println!("{}", hash),
            }
            Ok(())
        }
    }
}
