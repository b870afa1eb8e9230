pub mod answers;
pub mod config;
pub mod error;
pub mod marker;
pub mod patch;
pub mod path_locks;
pub mod platform;
pub mod platform_project;
pub mod properties;
pub mod status;

pub use answers::Answers;
pub use config::WizardConfig;
pub use error::{BoxError, WizardError};
pub use marker::{RECOGNITION_PATTERN, is_patched};
pub use patch::{PatchOperation, PatchOutcome};
pub use path_locks::PathLocks;
pub use platform::Platform;
pub use platform_project::{PlatformProject, WizardContext};
pub use properties::{Properties, PropertiesProvider};
pub use status::{PlatformState, PlatformStatus};
