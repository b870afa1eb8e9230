use std::path::{Path, PathBuf};

use symwiz_core::{BoxError, PatchOutcome, PathLocks, WizardError};

/// Reads `path`, runs `transform` over its content and writes the result
/// back only when it differs from what was read.
///
/// The read-modify-write cycle holds the path's advisory lock.
///
/// # Errors
/// Returns [`WizardError::Read`], [`WizardError::Parse`] (when `transform`
/// fails) or [`WizardError::Write`]. The file is untouched unless the write
/// itself fails.
pub async fn patch_file<F, E>(
    path: &Path,
    locks: &PathLocks,
    transform: F,
) -> Result<PatchOutcome, WizardError>
where
    F: FnOnce(&str) -> Result<String, E>,
    E: Into<BoxError>,
{
    let _guard = locks.lock(path).await;
    let original = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| WizardError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let patched = transform(&original).map_err(|e| WizardError::Parse {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    if patched == original {
        tracing::debug!(path = %path.display(), "unchanged");
        return Ok(PatchOutcome::Unchanged);
    }
    tokio::fs::write(path, patched)
        .await
        .map_err(|source| WizardError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!(path = %path.display(), "patched");
    Ok(PatchOutcome::Changed)
}

/// Runs [`patch_file`] over every path, attempting all of them.
///
/// Per-file failures are logged as they happen.
///
/// # Errors
/// Returns the first failure once every file has been attempted.
pub async fn patch_matching_files<F, E>(
    paths: impl IntoIterator<Item = PathBuf>,
    locks: &PathLocks,
    transform: F,
) -> Result<Vec<(PathBuf, PatchOutcome)>, WizardError>
where
    F: Fn(&str) -> Result<String, E>,
    E: Into<BoxError>,
{
    let mut outcomes = Vec::new();
    let mut first_error = None;
    for path in paths {
        match patch_file(&path, locks, &transform).await {
            Ok(outcome) => outcomes.push((path, outcome)),
            Err(e) => {
                tracing::warn!("{e}");
                first_error.get_or_insert(e);
            }
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => Ok(outcomes),
    }
}
