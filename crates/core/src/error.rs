use std::path::PathBuf;

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Recoverable failures of the scan/patch/write pipeline.
///
/// Every variant names the path it concerns. The orchestrator turns these
/// into per-platform warnings instead of aborting sibling platforms.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("invalid glob pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("failed to access {}", path.display())]
    Locate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The descriptor text is malformed or cannot take the requested edit.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory {}", path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove {}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WizardError {
    /// Path the error concerns, if any
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::InvalidPattern { .. } => None,
            Self::Locate { path, .. }
            | Self::Read { path, .. }
            | Self::Parse { path, .. }
            | Self::Write { path, .. }
            | Self::DirectoryCreate { path, .. }
            | Self::Remove { path, .. } => Some(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::path::Path;

    #[test]
    fn test_parse_error_message_includes_path_and_reason() {
        let err = WizardError::Parse {
            path: PathBuf::from("ios/App.xcodeproj/project.pbxproj"),
            source: "unexpected end of input".into(),
        };
        let message = err.to_string();
        assert!(message.contains("ios/App.xcodeproj/project.pbxproj"));
        assert!(message.contains("unexpected end of input"));
        assert_eq!(
            err.path(),
            Some(Path::new("ios/App.xcodeproj/project.pbxproj"))
        );
    }

    #[test]
    fn test_write_error_keeps_io_source() {
        let err = WizardError::Write {
            path: PathBuf::from("ios/sentry.properties"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("ios/sentry.properties"));
    }

    #[test]
    fn test_invalid_pattern_has_no_path() {
        let err = WizardError::InvalidPattern {
            pattern: "[".to_string(),
            reason: "invalid range".to_string(),
        };
        assert!(err.path().is_none());
    }
}
