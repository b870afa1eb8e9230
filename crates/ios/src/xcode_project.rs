use symwiz_core::RECOGNITION_PATTERN;
use symwiz_pbxproj::{EditError, ParseError, ProjectDescriptor};
use thiserror::Error;

use crate::upload_phase;

#[derive(Debug, Error)]
pub enum XcodeProjectError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Edit(#[from] EditError),
}

/// Adds the upload phase to an Xcode project unless one is already there.
///
/// # Errors
/// Returns error if the project does not parse or has no native target.
pub fn patch_xcode_project(content: &str, cli_path: &str) -> Result<String, XcodeProjectError> {
    let mut descriptor = ProjectDescriptor::parse(content)?;
    match descriptor.add_shell_script_phase(&upload_phase(cli_path), &RECOGNITION_PATTERN)? {
        Some(id) => tracing::debug!(id, "added upload build phase"),
        None => tracing::debug!("upload build phase already present"),
    }
    Ok(descriptor.serialize())
}

/// Removes every recognized upload phase from an Xcode project.
///
/// # Errors
/// Returns error if the project does not parse.
pub fn unpatch_xcode_project(content: &str) -> Result<String, XcodeProjectError> {
    let mut descriptor = ProjectDescriptor::parse(content)?;
    let removed = descriptor.remove_shell_script_phases_matching(&RECOGNITION_PATTERN);
    if !removed.is_empty() {
        tracing::debug!(ids = ?removed, "removed upload build phases");
    }
    Ok(descriptor.serialize())
}
