use std::path::PathBuf;

use async_trait::async_trait;
use symwiz_core::{
    PatchOperation, PatchOutcome, Platform, PlatformProject, RECOGNITION_PATTERN, WizardContext,
    WizardError,
};
use symwiz_utils::{FileLocator, patch_matching_files};

use crate::{patch_xcode_project, unpatch_xcode_project};

/// Xcode projects anywhere below the root, used by the uninstall sweep.
pub const XCODE_PROJECT_GLOB: &str = "**/*.xcodeproj/project.pbxproj";

#[derive(Debug, Default, Clone, Copy)]
pub struct IosProject;

impl IosProject {
    /// Glob of the Xcode projects this platform owns, relative to the root.
    #[must_use]
    pub fn descriptor_glob(ctx: &WizardContext) -> String {
        let dir = ctx.config.platforms_dir.trim().trim_end_matches('/');
        match dir {
            "" | "." => "ios/*.xcodeproj/project.pbxproj".to_string(),
            dir => format!("{dir}/ios/*.xcodeproj/project.pbxproj"),
        }
    }
}

async fn patch_all(
    ctx: &WizardContext,
    paths: Vec<PathBuf>,
    operation: PatchOperation,
) -> Result<Vec<(PathBuf, PatchOutcome)>, WizardError> {
    match operation {
        PatchOperation::Apply => {
            let cli_path = ctx.config.cli_path.as_str();
            patch_matching_files(paths, &ctx.locks, |content| {
                patch_xcode_project(content, cli_path)
            })
            .await
        }
        PatchOperation::Revert => {
            patch_matching_files(paths, &ctx.locks, unpatch_xcode_project).await
        }
    }
}

#[async_trait]
impl PlatformProject for IosProject {
    fn platform(&self) -> Platform {
        Platform::Ios
    }

    async fn locate_descriptors(&self, ctx: &WizardContext) -> Result<Vec<PathBuf>, WizardError> {
        let found = FileLocator::from_context(ctx)?
            .locate(&Self::descriptor_glob(ctx))
            .await?;
        Ok(found.into_iter().collect())
    }

    async fn descriptor_patched(&self, ctx: &WizardContext) -> Option<bool> {
        let result = match FileLocator::from_context(ctx) {
            Ok(locator) => {
                locator
                    .content_matches(&Self::descriptor_glob(ctx), &RECOGNITION_PATTERN)
                    .await
            }
            Err(e) => Err(e),
        };
        Some(result.unwrap_or_else(|e| {
            tracing::warn!("{e}");
            false
        }))
    }

    async fn patch_descriptors(
        &self,
        ctx: &WizardContext,
        operation: PatchOperation,
    ) -> Result<Vec<(PathBuf, PatchOutcome)>, WizardError> {
        let paths = self.locate_descriptors(ctx).await?;
        tracing::debug!(%operation, count = paths.len(), "patching Xcode projects");
        patch_all(ctx, paths, operation).await
    }
}

/// Reverts every Xcode project below the root, whichever platform owns it.
///
/// # Errors
/// Returns the first per-file failure once every project has been attempted.
pub async fn revert_all_xcode_projects(
    ctx: &WizardContext,
) -> Result<Vec<(PathBuf, PatchOutcome)>, WizardError> {
    let paths = FileLocator::from_context(ctx)?
        .locate(XCODE_PROJECT_GLOB)
        .await?;
    patch_all(ctx, paths.into_iter().collect(), PatchOperation::Revert).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::Path};
    use symwiz_core::{PlatformState, WizardConfig, is_patched};
    use tempfile::TempDir;

    const APP: &str = "{
\tobjects = {
\t\tT1 /* App */ = {
\t\t\tisa = PBXNativeTarget;
\t\t\tbuildPhases = (
\t\t\t);
\t\t};
\t};
}
";

    fn write_project(root: &Path, relative: &str, content: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_descriptor_glob() {
        let mut config = WizardConfig::default();
        let ctx = WizardContext::new(PathBuf::from("/app"), config.clone());
        assert_eq!(
            IosProject::descriptor_glob(&ctx),
            "ios/*.xcodeproj/project.pbxproj"
        );
        config.platforms_dir = "mobile/".to_string();
        let ctx = WizardContext::new(PathBuf::from("/app"), config);
        assert_eq!(
            IosProject::descriptor_glob(&ctx),
            "mobile/ios/*.xcodeproj/project.pbxproj"
        );
    }

    #[tokio::test]
    async fn test_apply_then_revert() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let path = write_project(root, "ios/App.xcodeproj/project.pbxproj", APP);
        let ctx = WizardContext::new(root.to_path_buf(), WizardConfig::default());

        assert_eq!(IosProject.descriptor_patched(&ctx).await, Some(false));
        assert_eq!(IosProject.status(&ctx).await.state(), PlatformState::Unconfigured);

        let outcomes = IosProject
            .patch_descriptors(&ctx, PatchOperation::Apply)
            .await
            .unwrap();
        assert_eq!(outcomes, vec![(path.clone(), PatchOutcome::Changed)]);
        assert!(is_patched(&fs::read_to_string(&path).unwrap()));
        assert_eq!(IosProject.descriptor_patched(&ctx).await, Some(true));
        assert_eq!(IosProject.status(&ctx).await.state(), PlatformState::NeedsPatch);

        let outcomes = IosProject
            .patch_descriptors(&ctx, PatchOperation::Apply)
            .await
            .unwrap();
        assert_eq!(outcomes, vec![(path.clone(), PatchOutcome::Unchanged)]);

        IosProject
            .patch_descriptors(&ctx, PatchOperation::Revert)
            .await
            .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), APP);
        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_malformed_project_does_not_stop_siblings() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let broken = write_project(root, "ios/Broken.xcodeproj/project.pbxproj", "{ objects = {");
        let good = write_project(root, "ios/Good.xcodeproj/project.pbxproj", APP);
        let ctx = WizardContext::new(root.to_path_buf(), WizardConfig::default());

        let err = IosProject
            .patch_descriptors(&ctx, PatchOperation::Apply)
            .await
            .unwrap_err();
        assert!(matches!(err, WizardError::Parse { .. }));
        assert_eq!(err.path(), Some(broken.as_path()));
        assert!(is_patched(&fs::read_to_string(&good).unwrap()));
        assert_eq!(fs::read_to_string(&broken).unwrap(), "{ objects = {");
        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_revert_all_reaches_outside_platform_dir() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let patched = crate::patch_xcode_project(APP, "sentry-cli").unwrap();
        let outside = write_project(root, "legacy/Old.xcodeproj/project.pbxproj", &patched);
        let ignored = write_project(root, "ios/Pods/Pods.xcodeproj/project.pbxproj", &patched);
        let ctx = WizardContext::new(root.to_path_buf(), WizardConfig::default());

        let outcomes = revert_all_xcode_projects(&ctx).await.unwrap();
        assert_eq!(outcomes, vec![(outside.clone(), PatchOutcome::Changed)]);
        assert_eq!(fs::read_to_string(&outside).unwrap(), APP);
        assert_eq!(fs::read_to_string(&ignored).unwrap(), patched);
        temp_dir.close().unwrap();
    }
}
