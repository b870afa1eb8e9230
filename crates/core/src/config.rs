use serde::{Deserialize, Serialize};

/// Loaded from `.symwiz/config.json`, controls where platforms live, what the
/// properties file is called and which paths scans skip.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WizardConfig {
    /// Directory containing the `ios` and `android` folders, relative to the root
    #[serde(default = "default_platforms_dir")]
    pub platforms_dir: String,

    /// Name of the per-platform properties file
    #[serde(default = "default_properties_file")]
    pub properties_file: String,

    /// Executable invoked by the upload build phase
    #[serde(default = "default_cli_path")]
    pub cli_path: String,

    /// Glob patterns excluded from every scan (e.g. "**/node_modules/**")
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,

    /// Service URL offered as the default answer
    #[serde(default = "default_url")]
    pub url: String,
}

fn default_platforms_dir() -> String {
    ".".to_string()
}

fn default_properties_file() -> String {
    "sentry.properties".to_string()
}

fn default_cli_path() -> String {
    "sentry-cli".to_string()
}

fn default_ignore() -> Vec<String> {
    vec!["**/node_modules/**".to_string(), "**/Pods/**".to_string()]
}

fn default_url() -> String {
    "https://sentry.io/".to_string()
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            platforms_dir: default_platforms_dir(),
            properties_file: default_properties_file(),
            cli_path: default_cli_path(),
            ignore: default_ignore(),
            url: default_url(),
        }
    }
}
