use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::{MatchOptions, Pattern};
use regex::Regex;
use symwiz_core::{WizardContext, WizardError};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Resolves glob patterns below one or more roots, skipping ignored paths.
#[derive(Debug, Clone)]
pub struct FileLocator {
    roots: Vec<PathBuf>,
    ignore: Vec<Pattern>,
}

fn compile(pattern: &str) -> Result<Pattern, WizardError> {
    Pattern::new(pattern).map_err(|e| WizardError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.msg.to_string(),
    })
}

impl FileLocator {
    /// # Errors
    /// Returns [`WizardError::InvalidPattern`] if an ignore pattern does not compile.
    pub fn new(roots: Vec<PathBuf>, ignore: &[String]) -> Result<Self, WizardError> {
        let ignore = ignore
            .iter()
            .map(|pattern| compile(pattern))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { roots, ignore })
    }

    /// A locator rooted at the project root with the configured ignore list.
    ///
    /// # Errors
    /// Returns [`WizardError::InvalidPattern`] if an ignore pattern does not compile.
    pub fn from_context(ctx: &WizardContext) -> Result<Self, WizardError> {
        Self::new(vec![ctx.root.clone()], &ctx.config.ignore)
    }

    fn is_ignored(&self, root: &Path, path: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);
        self.ignore
            .iter()
            .any(|pattern| pattern.matches_path_with(relative, MATCH_OPTIONS))
    }

    /// Every file matching `pattern` (relative to each root).
    ///
    /// Matching nothing is not an error. Entries that cannot be accessed are
    /// logged and skipped. The directory walk runs on the blocking pool.
    ///
    /// # Errors
    /// Returns [`WizardError::InvalidPattern`] if `pattern` does not compile.
    pub async fn locate(&self, pattern: &str) -> Result<BTreeSet<PathBuf>, WizardError> {
        compile(pattern)?;
        let locator = self.clone();
        let owned = pattern.to_string();
        tokio::task::spawn_blocking(move || locator.walk(&owned))
            .await
            .map_err(|e| WizardError::Locate {
                path: self.roots.first().cloned().unwrap_or_default(),
                source: std::io::Error::other(e),
            })?
    }

    fn walk(&self, pattern: &str) -> Result<BTreeSet<PathBuf>, WizardError> {
        let mut found = BTreeSet::new();
        for root in &self.roots {
            let full = format!(
                "{}/{}",
                Pattern::escape(&root.to_string_lossy()),
                pattern.trim_start_matches("./")
            );
            let entries = glob::glob_with(&full, MATCH_OPTIONS).map_err(|e| {
                WizardError::InvalidPattern {
                    pattern: pattern.to_string(),
                    reason: e.msg.to_string(),
                }
            })?;
            for entry in entries {
                match entry {
                    Ok(path) if path.is_file() && !self.is_ignored(root, &path) => {
                        found.insert(path);
                    }
                    Ok(_) => {}
                    Err(e) => {
                        let error = WizardError::Locate {
                            path: e.path().to_path_buf(),
                            source: e.into_error(),
                        };
                        tracing::warn!("{error}, skipping");
                    }
                }
            }
        }
        tracing::debug!(pattern, count = found.len(), "located files");
        Ok(found)
    }

    /// Whether any file matching `pattern` has content matching `regex`.
    ///
    /// Files are only read; a file that cannot be read is logged and skipped.
    ///
    /// # Errors
    /// Returns [`WizardError::InvalidPattern`] if `pattern` does not compile.
    pub async fn content_matches(&self, pattern: &str, regex: &Regex) -> Result<bool, WizardError> {
        for path in self.locate(pattern).await? {
            match tokio::fs::read_to_string(&path).await {
                Ok(content) if regex.is_match(&content) => return Ok(true),
                Ok(_) => {}
                Err(source) => {
                    let error = WizardError::Read { path, source };
                    tracing::warn!("{error}, skipping");
                }
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_locate_matches_and_ignores() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let app = write(root, "ios/App.xcodeproj/project.pbxproj", "{}");
        write(root, "ios/Pods/Pods.xcodeproj/project.pbxproj", "{}");
        write(
            root,
            "node_modules/lib/ios/Lib.xcodeproj/project.pbxproj",
            "{}",
        );

        let locator = FileLocator::new(
            vec![root.to_path_buf()],
            &["**/node_modules/**".to_string(), "**/Pods/**".to_string()],
        )
        .unwrap();
        let found = locator
            .locate("**/*.xcodeproj/project.pbxproj")
            .await
            .unwrap();
        assert_eq!(found.into_iter().collect::<Vec<_>>(), vec![app]);
        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_locate_nothing_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let locator = FileLocator::new(vec![temp_dir.path().to_path_buf()], &[]).unwrap();
        assert!(
            locator
                .locate("ios/*.xcodeproj/project.pbxproj")
                .await
                .unwrap()
                .is_empty()
        );
        temp_dir.close().unwrap();
    }

    #[tokio::test]
    async fn test_locate_across_roots() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let a = write(first.path(), "a.txt", "a");
        let b = write(second.path(), "b.txt", "b");
        let locator = FileLocator::new(
            vec![first.path().to_path_buf(), second.path().to_path_buf()],
            &[],
        )
        .unwrap();
        let found = locator.locate("*.txt").await.unwrap();
        assert!(found.contains(&a));
        assert!(found.contains(&b));
        first.close().unwrap();
        second.close().unwrap();
    }

    #[tokio::test]
    async fn test_invalid_patterns() {
        assert!(matches!(
            FileLocator::new(vec![PathBuf::from(".")], &["[".to_string()]),
            Err(WizardError::InvalidPattern { .. })
        ));
        let locator = FileLocator::new(vec![PathBuf::from(".")], &[]).unwrap();
        assert!(matches!(
            locator.locate("***").await,
            Err(WizardError::InvalidPattern { .. })
        ));
    }

    #[tokio::test]
    async fn test_content_matches() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "ios/A.xcodeproj/project.pbxproj", "shellScript = \"echo\";");
        let locator = FileLocator::new(vec![root.to_path_buf()], &[]).unwrap();
        let regex = Regex::new("sentry-cli").unwrap();
        let pattern = "ios/*.xcodeproj/project.pbxproj";
        assert!(!locator.content_matches(pattern, &regex).await.unwrap());

        write(
            root,
            "ios/B.xcodeproj/project.pbxproj",
            "shellScript = \"sentry-cli debug-files upload\";",
        );
        assert!(locator.content_matches(pattern, &regex).await.unwrap());
        // read only
        assert_eq!(
            fs::read_to_string(root.join("ios/A.xcodeproj/project.pbxproj")).unwrap(),
            "shellScript = \"echo\";"
        );
        temp_dir.close().unwrap();
    }
}
