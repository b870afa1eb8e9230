use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use symwiz_core::WizardContext;
use symwiz_utils::{SentryCliProperties, get_symwiz_config};

use crate::{
    answers::{WizardArgs, collect_answers},
    options::FormatOptions,
    platforms::get_platforms,
    prompter::{InquirePrompter, Prompter},
    wizard::{UnitResult, WizardReport, run_setup, run_uninstall},
};

fn display_report(report: &WizardReport) -> String {
    report
        .iter()
        .map(|(platform, result)| match result {
            UnitResult::Configured => format!("{} {platform} configured", "✔".bright_green()),
            UnitResult::Reverted => format!("{} {platform} setup removed", "✔".bright_green()),
            UnitResult::Skipped => format!(
                "{} {platform} {}",
                "-".bright_black(),
                "nothing to do".bright_black()
            ),
            UnitResult::Failed { error } => format!(
                "{} {platform} {}",
                "⚠".yellow(),
                format!("failed: {error}").yellow()
            ),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Set up (or with `--uninstall`, remove) debug symbol upload
///
/// # Errors
/// Returns error if the configuration is invalid or a prompt is cancelled.
/// Failures of individual platforms are reported, not returned.
pub async fn handle_wizard(args: &WizardArgs, root: &Path) -> Result<()> {
    handle_wizard_with_prompter(args, root, &InquirePrompter).await
}

/// # Errors
/// Returns error if the configuration is invalid or a prompt is cancelled.
pub async fn handle_wizard_with_prompter(
    args: &WizardArgs,
    root: &Path,
    prompter: &dyn Prompter,
) -> Result<()> {
    let config = get_symwiz_config(root).await?;
    let Some(answers) = collect_answers(args, &config, prompter)? else {
        if args.format == FormatOptions::Stdout {
            println!("Nothing to do");
        } else {
            println!("{{}}");
        }
        return Ok(());
    };
    let ctx = WizardContext::new(root.to_path_buf(), config);
    let projects = get_platforms();

    let report = if answers.uninstall {
        run_uninstall(&ctx, &projects, &answers).await
    } else {
        run_setup(&ctx, &projects, &answers, &SentryCliProperties).await
    };
    args.format.print(
        &display_report(&report),
        &serde_json::to_string_pretty(&report)?,
    );
    Ok(())
}
