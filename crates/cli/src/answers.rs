use anyhow::Result;
use symwiz_core::{Answers, Platform, WizardConfig};

use crate::{options::FormatOptions, prompter::Prompter};

/// Flags of the default wizard command.
#[derive(Debug, Clone, Default)]
pub struct WizardArgs {
    pub uninstall: bool,
    pub platforms: Vec<Platform>,
    pub url: Option<String>,
    pub org: Option<String>,
    pub project: Option<String>,
    pub auth_token: Option<String>,
    pub yes: bool,
    pub format: FormatOptions,
}

fn non_empty(value: String) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Fills in whatever the flags leave open, asking `prompter` unless `--yes` was given.
///
/// Returns `None` when the user declines to uninstall or selects no platform.
///
/// # Errors
/// Returns error if a prompt is cancelled or fails.
pub fn collect_answers(
    args: &WizardArgs,
    config: &WizardConfig,
    prompter: &dyn Prompter,
) -> Result<Option<Answers>> {
    let platforms = if !args.platforms.is_empty() {
        let mut platforms = args.platforms.clone();
        platforms.sort();
        platforms.dedup();
        platforms
    } else if args.yes {
        Platform::ALL.to_vec()
    } else {
        let message = if args.uninstall {
            "Select platforms to remove the setup from"
        } else {
            "Select platforms to set up"
        };
        prompter.multi_select(message, Platform::ALL.to_vec(), vec![0, 1])?
    };
    if platforms.is_empty() {
        return Ok(None);
    }

    if args.uninstall {
        if !args.yes && !prompter.confirm("Remove the debug symbol upload setup?")? {
            return Ok(None);
        }
        return Ok(Some(Answers {
            platforms,
            uninstall: true,
            ..Default::default()
        }));
    }

    let ask = |value: &Option<String>, message: &str, default: Option<&str>| -> Result<Option<String>> {
        match value {
            Some(value) => Ok(non_empty(value.clone())),
            None if args.yes => Ok(default.map(str::to_string)),
            None => Ok(non_empty(prompter.text(message, default)?)),
        }
    };
    let url = ask(&args.url, "Sentry URL", Some(config.url.as_str()))?;
    let org = ask(&args.org, "Organization slug", None)?;
    let project = ask(&args.project, "Project slug", None)?;
    let auth_token = match &args.auth_token {
        Some(token) => non_empty(token.clone()),
        None if args.yes => None,
        None => non_empty(prompter.secret("Auth token")?),
    };

    Ok(Some(Answers {
        platforms,
        uninstall: false,
        url,
        org,
        project,
        auth_token,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompter::MockPrompter;

    #[test]
    fn test_flags_skip_prompts() {
        let args = WizardArgs {
            platforms: vec![Platform::Android, Platform::Ios, Platform::Android],
            url: Some("https://sentry.example.com/".to_string()),
            org: Some("acme".to_string()),
            project: Some("app".to_string()),
            auth_token: Some("secret".to_string()),
            ..Default::default()
        };
        let prompter = MockPrompter {
            select_all: false,
            ..Default::default()
        };
        let answers = collect_answers(&args, &WizardConfig::default(), &prompter)
            .unwrap()
            .unwrap();
        assert_eq!(answers.platforms, vec![Platform::Ios, Platform::Android]);
        assert_eq!(answers.url.as_deref(), Some("https://sentry.example.com/"));
        assert_eq!(answers.auth_token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_yes_uses_defaults() {
        let args = WizardArgs {
            yes: true,
            ..Default::default()
        };
        let answers = collect_answers(&args, &WizardConfig::default(), &MockPrompter::default())
            .unwrap()
            .unwrap();
        assert_eq!(answers.platforms, Platform::ALL.to_vec());
        assert_eq!(answers.url.as_deref(), Some("https://sentry.io/"));
        assert!(answers.org.is_none());
        assert!(answers.auth_token.is_none());
    }

    #[test]
    fn test_prompts_fill_missing_values() {
        let answers = collect_answers(
            &WizardArgs::default(),
            &WizardConfig::default(),
            &MockPrompter::default(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(answers.platforms, Platform::ALL.to_vec());
        assert_eq!(answers.org.as_deref(), Some("test value"));
        assert_eq!(answers.auth_token.as_deref(), Some("test value"));
    }

    #[test]
    fn test_no_platform_selected() {
        let prompter = MockPrompter {
            select_all: false,
            ..Default::default()
        };
        assert!(
            collect_answers(&WizardArgs::default(), &WizardConfig::default(), &prompter)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_uninstall_declined() {
        let args = WizardArgs {
            uninstall: true,
            ..Default::default()
        };
        let prompter = MockPrompter {
            confirm_value: false,
            ..Default::default()
        };
        assert!(
            collect_answers(&args, &WizardConfig::default(), &prompter)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_uninstall_confirmed() {
        let args = WizardArgs {
            uninstall: true,
            platforms: vec![Platform::Ios],
            ..Default::default()
        };
        let answers = collect_answers(&args, &WizardConfig::default(), &MockPrompter::default())
            .unwrap()
            .unwrap();
        assert!(answers.uninstall);
        assert_eq!(answers.platforms, vec![Platform::Ios]);
        assert!(answers.url.is_none());
    }
}
