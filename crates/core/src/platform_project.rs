use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{
    PatchOperation, PatchOutcome, PathLocks, Platform, PlatformStatus, WizardConfig, WizardError,
};

/// Shared state handed to every platform unit.
#[derive(Debug, Clone)]
pub struct WizardContext {
    pub root: PathBuf,
    pub config: WizardConfig,
    pub locks: PathLocks,
}

impl WizardContext {
    #[must_use]
    pub fn new(root: PathBuf, config: WizardConfig) -> Self {
        Self {
            root,
            config,
            locks: PathLocks::new(),
        }
    }

    /// Directory holding all platform folders
    #[must_use]
    pub fn platforms_root(&self) -> PathBuf {
        match self.config.platforms_dir.trim() {
            "" | "." => self.root.clone(),
            dir => self.root.join(dir),
        }
    }

    #[must_use]
    pub fn platform_dir(&self, platform: Platform) -> PathBuf {
        self.platforms_root().join(platform.key())
    }

    /// Location of the properties file that marks a platform as configured
    #[must_use]
    pub fn properties_path(&self, platform: Platform) -> PathBuf {
        self.platform_dir(platform)
            .join(&self.config.properties_file)
    }

    /// Path relative to the root, for display
    #[must_use]
    pub fn display_path<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}

/// Capabilities of one platform variant.
///
/// Each platform crate implements this trait; the orchestrator dispatches
/// through a table of boxed implementations keyed by [`Platform`].
#[async_trait]
pub trait PlatformProject: std::fmt::Debug + Send + Sync {
    fn platform(&self) -> Platform;

    /// # Errors
    /// Returns error if a glob pattern is invalid.
    async fn locate_descriptors(&self, _ctx: &WizardContext) -> Result<Vec<PathBuf>, WizardError> {
        Ok(Vec::new())
    }

    /// Whether any located descriptor carries the upload phase.
    /// `None` for platforms that have no descriptor to patch.
    async fn descriptor_patched(&self, _ctx: &WizardContext) -> Option<bool> {
        None
    }

    /// # Errors
    /// Returns the first per-file failure after every file has been attempted.
    async fn patch_descriptors(
        &self,
        _ctx: &WizardContext,
        _operation: PatchOperation,
    ) -> Result<Vec<(PathBuf, PatchOutcome)>, WizardError> {
        Ok(Vec::new())
    }

    async fn status(&self, ctx: &WizardContext) -> PlatformStatus {
        let marker_present = tokio::fs::try_exists(ctx.properties_path(self.platform()))
            .await
            .unwrap_or(false);
        PlatformStatus {
            marker_present,
            descriptor_patched: self.descriptor_patched(ctx).await,
        }
    }

    /// # Errors
    /// Returns error if the platform directory cannot be created or the file cannot be written.
    async fn write_properties(
        &self,
        ctx: &WizardContext,
        properties: &str,
    ) -> Result<(), WizardError> {
        let path = ctx.properties_path(self.platform());
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|source| WizardError::DirectoryCreate {
                    path: dir.to_path_buf(),
                    source,
                })?;
        }
        tokio::fs::write(&path, properties)
            .await
            .map_err(|source| WizardError::Write {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(path = %path.display(), "wrote properties");
        Ok(())
    }

    /// Deletes the properties file. Returns whether a file was removed.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be removed.
    async fn remove_properties(&self, ctx: &WizardContext) -> Result<bool, WizardError> {
        let path = ctx.properties_path(self.platform());
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(WizardError::Remove { path, source }),
        }
    }
}
