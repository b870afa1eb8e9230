mod file_locator;
mod get_symwiz_config;
mod patch_file;
mod sentry_cli_properties;

pub use file_locator::FileLocator;
pub use get_symwiz_config::{CONFIG_PATH, get_symwiz_config};
pub use patch_file::{patch_file, patch_matching_files};
pub use sentry_cli_properties::SentryCliProperties;
