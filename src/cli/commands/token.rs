use clap::Args;
use serde_json::json;
use uuid::Uuid;

use crate::auth::{generate_jwt, Identity};
use crate::cli::utils::output_result;
use crate::cli::OutputFormat;
use crate::config::AppConfig;

#[derive(Args)]
pub struct TokenArgs {
    #[arg(help = "User id (random when omitted)")]
    pub user_id: Option<Uuid>,
    #[arg(long, help = "Email claim")]
    pub email: Option<String>,
}

pub fn handle(args: TokenArgs, config: AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let identity = Identity::new(args.user_id.unwrap_or_else(Uuid::new_v4), args.email);
    let token = generate_jwt(&identity, &config.security)?;

    output_result(
        output_format,
        &json!({
            "token": token,
            "userId": identity.user_id,
            "expiresInHours": config.security.jwt_expiry_hours
        }),
        &token,
    )
}
