use clap::Args;
use uuid::Uuid;

use crate::auth::Identity;
use crate::cli::utils::{output_result, yes_no};
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::entitlements::{self, EntitlementResult};

#[derive(Args)]
pub struct EntitlementArgs {
    #[arg(help = "User id")]
    pub user_id: Uuid,
    #[arg(long, help = "User email, checked against the admin allow-list")]
    pub email: Option<String>,
}

pub async fn handle(args: EntitlementArgs, config: AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let state = crate::cli::connect_state(config).await?;
    let identity = Identity::new(args.user_id, args.email);

    let result = state
        .loader
        .load(Some(&identity))
        .await?
        .ok_or_else(|| anyhow::anyhow!("no entitlement for user {}", identity.user_id))?;

    output_result(output_format, &result, &render(&result))
}

fn render(result: &EntitlementResult) -> String {
    let plan = result
        .subscription
        .as_ref()
        .map(|sub| sub.plan.to_string())
        .unwrap_or_else(|| "none".to_string());
    let trial = entitlements::trial_days_left(result.subscription.as_ref())
        .map(|days| format!("{} day(s)", days))
        .unwrap_or_else(|| "-".to_string());

    format!(
        "plan:              {}\nadmin:             {}\npro active:        {}\nstandard or above: {}\ntrial left:        {}",
        plan,
        yes_no(result.is_admin),
        yes_no(result.pro_active),
        yes_no(result.standard_or_above()),
        trial
    )
}
