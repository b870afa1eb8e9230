use anyhow::Result;
use symwiz_core::Platform;
use thiserror::Error;

/// Error type for user cancellation (Ctrl+C or ESC)
#[derive(Debug, Error)]
#[error("cancelled")]
pub struct UserCancelled;

/// Dependency injection interface for interactive prompts.
///
/// Commands accept `&dyn Prompter`; production code uses `InquirePrompter`,
/// tests use `MockPrompter` with predetermined responses.
pub trait Prompter: Send + Sync {
    /// # Errors
    /// Returns error if user cancels the selection or interaction fails.
    fn multi_select(
        &self,
        message: &str,
        options: Vec<Platform>,
        defaults: Vec<usize>,
    ) -> Result<Vec<Platform>>;

    /// # Errors
    /// Returns error if user cancels the confirmation or interaction fails.
    fn confirm(&self, message: &str) -> Result<bool>;

    /// # Errors
    /// Returns error if user cancels the input or interaction fails.
    fn text(&self, message: &str, default: Option<&str>) -> Result<String>;

    /// Like [`text`](Self::text), without echoing what is typed.
    ///
    /// # Errors
    /// Returns error if user cancels the input or interaction fails.
    fn secret(&self, message: &str) -> Result<String>;
}

fn handle_inquire_result<T>(result: Result<T, inquire::InquireError>) -> Result<T> {
    match result {
        Ok(v) => Ok(v),
        Err(
            inquire::InquireError::OperationCanceled | inquire::InquireError::OperationInterrupted,
        ) => Err(UserCancelled.into()),
        Err(e) => Err(e.into()),
    }
}

/// Real implementation using inquire crate
#[derive(Default)]
pub struct InquirePrompter;

#[cfg(not(tarpaulin_include))]
impl Prompter for InquirePrompter {
    fn multi_select(
        &self,
        message: &str,
        options: Vec<Platform>,
        defaults: Vec<usize>,
    ) -> Result<Vec<Platform>> {
        let mut selector = inquire::MultiSelect::new(message, options);
        selector.default = Some(defaults);
        handle_inquire_result(selector.prompt())
    }

    fn confirm(&self, message: &str) -> Result<bool> {
        handle_inquire_result(inquire::Confirm::new(message).with_default(false).prompt())
    }

    fn text(&self, message: &str, default: Option<&str>) -> Result<String> {
        let mut text = inquire::Text::new(message);
        if let Some(default) = default {
            text = text.with_default(default);
        }
        handle_inquire_result(text.prompt())
    }

    fn secret(&self, message: &str) -> Result<String> {
        handle_inquire_result(
            inquire::Password::new(message)
                .without_confirmation()
                .with_display_mode(inquire::PasswordDisplayMode::Masked)
                .prompt(),
        )
    }
}

/// Mock implementation that returns predefined values (for testing)
pub struct MockPrompter {
    pub select_all: bool,
    pub confirm_value: bool,
    /// Returned by `text` and `secret`; an empty value falls back to the prompt default
    pub text_value: String,
}

impl Default for MockPrompter {
    fn default() -> Self {
        Self {
            select_all: true,
            confirm_value: true,
            text_value: "test value".to_string(),
        }
    }
}

impl Prompter for MockPrompter {
    fn multi_select(
        &self,
        _message: &str,
        options: Vec<Platform>,
        _defaults: Vec<usize>,
    ) -> Result<Vec<Platform>> {
        if self.select_all {
            Ok(options)
        } else {
            Ok(vec![])
        }
    }

    fn confirm(&self, _message: &str) -> Result<bool> {
        Ok(self.confirm_value)
    }

    fn text(&self, _message: &str, default: Option<&str>) -> Result<String> {
        match (self.text_value.as_str(), default) {
            ("", Some(default)) => Ok(default.to_string()),
            (value, _) => Ok(value.to_string()),
        }
    }

    fn secret(&self, _message: &str) -> Result<String> {
        Ok(self.text_value.clone())
    }
}
