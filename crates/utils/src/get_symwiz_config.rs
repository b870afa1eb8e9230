use std::path::Path;

use anyhow::{Context, Result, bail};
use symwiz_core::WizardConfig;

/// Location of the config file, relative to the project root.
pub const CONFIG_PATH: &str = ".symwiz/config.json";

/// Loads `.symwiz/config.json` below `root`, falling back to defaults when it is absent.
///
/// # Errors
/// Returns error if the file exists but cannot be read, is not valid JSON,
/// or names a `cliPath` that is not a `sentry-cli` executable.
pub async fn get_symwiz_config(root: &Path) -> Result<WizardConfig> {
    let path = root.join(CONFIG_PATH);
    let config = match tokio::fs::read_to_string(&path).await {
        Ok(content) => serde_json::from_str::<WizardConfig>(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => WizardConfig::default(),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };

    let executable = Path::new(&config.cli_path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    if !matches!(executable, "sentry-cli" | "sentry-cli.exe") {
        bail!(
            "Invalid config file {}: cliPath `{}` must point to a sentry-cli executable",
            path.display(),
            config.cli_path
        );
    }
    if config.properties_file.trim().is_empty() {
        bail!(
            "Invalid config file {}: propertiesFile must not be empty",
            path.display()
        );
    }
    Ok(config)
}
