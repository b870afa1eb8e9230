use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// In-process advisory locks keyed by canonical path.
///
/// Platform units own disjoint files, so the locks are normally uncontended;
/// they serialize read-modify-write cycles if two units ever resolve to the
/// same descriptor. Entries nobody holds or waits for are dropped the next
/// time a lock is taken.
#[derive(Debug, Default, Clone)]
pub struct PathLocks {
    locks: Arc<Mutex<HashMap<PathBuf, Arc<AsyncMutex<()>>>>>,
}

impl PathLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other holder has `path` locked.
    pub async fn lock(&self, path: &Path) -> OwnedMutexGuard<()> {
        let key = tokio::fs::canonicalize(path)
            .await
            .unwrap_or_else(|_| path.to_path_buf());
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(key).or_default().clone()
        };
        lock.lock_owned().await
    }
}
