use serde::Serialize;
use std::fmt::Display;

/// The two edits the wizard performs on a project descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOperation {
    /// Insert the upload build phase
    Apply,
    /// Remove every recognized upload build phase
    Revert,
}

/// Result of patching a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOutcome {
    /// New content was written
    Changed,
    /// The edit was a no-op, nothing was written
    Unchanged,
}

impl Display for PatchOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Apply => "apply",
            Self::Revert => "revert",
        })
    }
}

impl Display for PatchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Changed => "changed",
            Self::Unchanged => "unchanged",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(PatchOperation::Apply.to_string(), "apply");
        assert_eq!(PatchOperation::Revert.to_string(), "revert");
        assert_eq!(PatchOutcome::Changed.to_string(), "changed");
        assert_eq!(PatchOutcome::Unchanged.to_string(), "unchanged");
    }
}
