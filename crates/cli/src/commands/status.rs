use std::{collections::BTreeMap, path::Path};

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use symwiz_core::{Platform, PlatformState, PlatformStatus, WizardContext};
use symwiz_utils::get_symwiz_config;

use crate::{options::FormatOptions, platforms::get_platforms};

#[derive(Args, Debug)]
#[command(about = "Show which platforms are set up for debug symbol upload")]
pub struct StatusArgs {
    #[arg(long, default_value = "stdout")]
    pub format: FormatOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusEntry {
    state: PlatformState,
    #[serde(flatten)]
    status: PlatformStatus,
}

fn display_status(platform: Platform, status: &PlatformStatus) -> String {
    let state = match status.state() {
        PlatformState::Patched => "configured".bright_green(),
        PlatformState::NeedsPatch => "incomplete".yellow(),
        PlatformState::Unconfigured => "not configured".bright_black(),
    };
    let marker = if status.marker_present { "present" } else { "missing" };
    let project = match status.descriptor_patched {
        Some(true) => " · upload phase present",
        Some(false) => " · upload phase missing",
        None => "",
    };
    format!(
        "{} {} {}",
        platform,
        state,
        format!("(properties {marker}{project})").bright_black()
    )
}

/// Print each platform's configuration state
///
/// # Errors
/// Returns error if the configuration cannot be loaded.
pub async fn handle_status(args: &StatusArgs, root: &Path) -> Result<()> {
    let config = get_symwiz_config(root).await?;
    let ctx = WizardContext::new(root.to_path_buf(), config);
    let ctx = &ctx;
    let projects = get_platforms();
    let statuses = futures::future::join_all(
        projects
            .iter()
            .map(|project| async move { (project.platform(), project.status(ctx).await) }),
    )
    .await;

    let lines = statuses
        .iter()
        .map(|(platform, status)| display_status(*platform, status))
        .collect::<Vec<_>>()
        .join("\n");
    let entries = statuses
        .iter()
        .map(|(platform, status)| {
            (
                *platform,
                StatusEntry {
                    state: status.state(),
                    status: *status,
                },
            )
        })
        .collect::<BTreeMap<_, _>>();
    args.format
        .print(&lines, &serde_json::to_string_pretty(&entries)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_status() {
        let line = display_status(
            Platform::Ios,
            &PlatformStatus {
                marker_present: true,
                descriptor_patched: Some(false),
            },
        );
        assert!(line.contains("incomplete"));
        assert!(line.contains("properties present"));
        assert!(line.contains("upload phase missing"));

        let line = display_status(
            Platform::Android,
            &PlatformStatus {
                marker_present: false,
                descriptor_patched: None,
            },
        );
        assert!(line.contains("not configured"));
        assert!(!line.contains("upload phase"));
    }

    #[test]
    fn test_status_entry_json() {
        let entry = StatusEntry {
            state: PlatformState::Patched,
            status: PlatformStatus {
                marker_present: true,
                descriptor_patched: None,
            },
        };
        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"state":"patched","markerPresent":true,"descriptorPatched":null}"#
        );
    }
}
