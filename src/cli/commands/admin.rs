use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::auth::Identity;
use crate::cli::utils::{output_result, yes_no};
use crate::cli::OutputFormat;
use crate::config::AppConfig;

#[derive(Subcommand)]
pub enum AdminCommands {
    #[command(about = "Check whether a user is an admin (allow-list, then profile flag)")]
    Check {
        #[arg(help = "User id")]
        user_id: Uuid,
        #[arg(long, help = "User email")]
        email: Option<String>,
    },
}

pub async fn handle(cmd: AdminCommands, config: AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AdminCommands::Check { user_id, email } => {
            let state = crate::cli::connect_state(config).await?;
            let identity = Identity::new(user_id, email);
            let is_admin = state.admin.is_admin(&identity).await?;

            output_result(
                output_format,
                &json!({ "userId": user_id, "isAdmin": is_admin }),
                &format!("{} admin: {}", user_id, yes_no(is_admin)),
            )
        }
    }
}
