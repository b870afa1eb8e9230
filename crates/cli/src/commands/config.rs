use std::path::Path;

use anyhow::Result;
use clap::Args;
use symwiz_utils::get_symwiz_config;

#[derive(Args, Debug)]
#[command(about = "Show the effective symwiz configuration")]
pub struct ConfigArgs {}

/// Display symwiz configuration
///
/// # Errors
/// Returns error if reading the configuration fails.
pub async fn handle_config(_args: &ConfigArgs, root: &Path) -> Result<()> {
    let config = get_symwiz_config(root).await?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
