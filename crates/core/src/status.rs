use serde::Serialize;
use std::fmt::Display;

/// Where a platform sits in the `Unconfigured -> NeedsPatch -> Patched` lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PlatformState {
    Unconfigured,
    NeedsPatch,
    Patched,
}

/// Observed configuration signals of one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStatus {
    /// The properties file exists
    pub marker_present: bool,
    /// Some descriptor carries the upload phase; `None` for platforms without descriptors
    pub descriptor_patched: Option<bool>,
}

impl PlatformStatus {
    /// Setup is required when the marker is missing or a descriptor lacks the upload phase.
    #[must_use]
    pub fn needs_patch(&self) -> bool {
        !self.marker_present || self.descriptor_patched == Some(false)
    }

    #[must_use]
    pub fn needs_revert(&self) -> bool {
        !self.needs_patch()
    }

    #[must_use]
    pub fn state(&self) -> PlatformState {
        if !self.needs_patch() {
            PlatformState::Patched
        } else if !self.marker_present && self.descriptor_patched != Some(true) {
            PlatformState::Unconfigured
        } else {
            PlatformState::NeedsPatch
        }
    }
}

impl Display for PlatformState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Unconfigured => "unconfigured",
            Self::NeedsPatch => "needs patch",
            Self::Patched => "patched",
        })
    }
}
