use regex::Regex;
use std::sync::LazyLock;

/// Signature of the upload build phase: the CLI name followed by one of its
/// debug-symbol upload sub-commands.
///
/// Shared by the "already patched" check, the idempotent add and the revert
/// matcher, so all three agree on what the wizard owns.
pub static RECOGNITION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"sentry-cli(?:\.exe)?\s+(?:debug-files\s+upload|upload-dif|upload-dsym)")
        .expect("hardcoded regex must compile")
});

#[must_use]
pub fn is_patched(content: &str) -> bool {
    RECOGNITION_PATTERN.is_match(content)
}
