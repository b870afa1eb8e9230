mod build_phase;
mod ios_project;
mod xcode_project;

pub use build_phase::{UPLOAD_PHASE_LABEL, upload_phase, upload_script};
pub use ios_project::{IosProject, XCODE_PROJECT_GLOB, revert_all_xcode_projects};
pub use xcode_project::{XcodeProjectError, patch_xcode_project, unpatch_xcode_project};
