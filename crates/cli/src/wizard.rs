//! The platform orchestrator.
//!
//! One unit of work per requested platform, all driven together by
//! `join_all` on the calling task. A unit catches and logs its own failure,
//! so one broken platform never prevents the others from finishing.

use std::{collections::BTreeMap, error::Error};

use futures::future::join_all;
use serde::Serialize;
use symwiz_core::{
    Answers, PatchOperation, Platform, PlatformProject, PropertiesProvider, WizardContext,
    WizardError,
};

/// How a platform's unit ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum UnitResult {
    Configured,
    Reverted,
    /// Nothing to do for this platform
    Skipped,
    Failed { error: String },
}

pub type WizardReport = BTreeMap<Platform, UnitResult>;

/// `error` followed by its sources, joined with `: `.
pub(crate) fn error_chain(error: &dyn Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_message = cause.to_string();
        if !message.contains(&cause_message) {
            message.push_str(": ");
            message.push_str(&cause_message);
        }
        source = cause.source();
    }
    message
}

fn settle(platform: Platform, result: Result<UnitResult, WizardError>) -> UnitResult {
    result.unwrap_or_else(|e| {
        let error = error_chain(&e);
        tracing::warn!(platform = platform.key(), "{error}");
        UnitResult::Failed { error }
    })
}

async fn setup_unit(
    ctx: &WizardContext,
    project: &dyn PlatformProject,
    properties: &str,
) -> Result<UnitResult, WizardError> {
    let status = project.status(ctx).await;
    if !status.needs_patch() {
        tracing::info!(platform = project.platform().key(), "already configured");
        return Ok(UnitResult::Skipped);
    }
    project
        .patch_descriptors(ctx, PatchOperation::Apply)
        .await?;
    project.write_properties(ctx, properties).await?;
    Ok(UnitResult::Configured)
}

async fn revert_unit(
    ctx: &WizardContext,
    project: &dyn PlatformProject,
) -> Result<UnitResult, WizardError> {
    let status = project.status(ctx).await;
    if !status.needs_revert() {
        tracing::info!(platform = project.platform().key(), "not configured");
        return Ok(UnitResult::Skipped);
    }
    project
        .patch_descriptors(ctx, PatchOperation::Revert)
        .await?;
    project.remove_properties(ctx).await?;
    Ok(UnitResult::Reverted)
}

/// Configures every requested platform that needs it.
pub async fn run_setup(
    ctx: &WizardContext,
    projects: &[Box<dyn PlatformProject>],
    answers: &Answers,
    provider: &dyn PropertiesProvider,
) -> WizardReport {
    let properties = provider.dump_properties(&provider.convert_answers(answers));
    let units = projects
        .iter()
        .filter(|project| answers.wants(project.platform()))
        .map(|project| {
            let properties = properties.as_str();
            async move {
                let platform = project.platform();
                (
                    platform,
                    settle(platform, setup_unit(ctx, project.as_ref(), properties).await),
                )
            }
        });
    join_all(units).await.into_iter().collect()
}

/// Reverts every requested platform that is configured, then sweeps all
/// Xcode projects below the root for leftover upload phases.
pub async fn run_uninstall(
    ctx: &WizardContext,
    projects: &[Box<dyn PlatformProject>],
    answers: &Answers,
) -> WizardReport {
    let units = projects
        .iter()
        .filter(|project| answers.wants(project.platform()))
        .map(|project| async move {
            let platform = project.platform();
            (
                platform,
                settle(platform, revert_unit(ctx, project.as_ref()).await),
            )
        });
    let report = join_all(units).await.into_iter().collect();

    if let Err(e) = symwiz_ios::revert_all_xcode_projects(ctx).await {
        tracing::warn!("{}", error_chain(&e));
    }
    report
}
