use async_trait::async_trait;
use symwiz_core::{Platform, PlatformProject};

/// Android only needs the properties file; the Gradle plugin picks it up.
#[derive(Debug, Default, Clone, Copy)]
pub struct AndroidProject;

#[async_trait]
impl PlatformProject for AndroidProject {
    fn platform(&self) -> Platform {
        Platform::Android
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symwiz_core::{PatchOperation, PlatformState, WizardConfig, WizardContext};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_marker_alone_decides_state() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = WizardContext::new(temp_dir.path().to_path_buf(), WizardConfig::default());

        let status = AndroidProject.status(&ctx).await;
        assert_eq!(status.descriptor_patched, None);
        assert_eq!(status.state(), PlatformState::Unconfigured);

        AndroidProject
            .write_properties(&ctx, "defaults.org=acme\n")
            .await
            .unwrap();
        let status = AndroidProject.status(&ctx).await;
        assert_eq!(status.state(), PlatformState::Patched);
        assert!(status.needs_revert());
        assert!(
            temp_dir
                .path()
                .join("android/sentry.properties")
                .is_file()
        );
        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_no_descriptors_to_patch() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = WizardContext::new(temp_dir.path().to_path_buf(), WizardConfig::default());
        assert!(
            AndroidProject
                .patch_descriptors(&ctx, PatchOperation::Apply)
                .await
                .unwrap()
                .is_empty()
        );
        assert!(AndroidProject.locate_descriptors(&ctx).await.unwrap().is_empty());
        temp_dir.close().unwrap();
    }
}
