use serde::Serialize;
use serde_json::json;

use crate::cli::OutputFormat;

/// Print `data` as a JSON success envelope, or the text rendering otherwise
pub fn output_result<T: Serialize>(output_format: OutputFormat, data: &T, text: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let response = json!({
                "success": true,
                "data": data
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("{}", text);
        }
    }
    Ok(())
}

pub fn output_success(output_format: OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({ "success": true, "message": message }))?
            );
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// `yes`/`no` for text output
pub fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
