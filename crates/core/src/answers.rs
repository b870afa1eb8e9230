use serde::{Deserialize, Serialize};

use crate::Platform;

/// Everything the user told the wizard, either through flags or prompts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answers {
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub uninstall: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub org: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub auth_token: Option<String>,
}

impl Answers {
    #[must_use]
    pub fn wants(&self, platform: Platform) -> bool {
        self.platforms.contains(&platform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers_wants() {
        let answers = Answers {
            platforms: vec![Platform::Ios],
            ..Default::default()
        };
        assert!(answers.wants(Platform::Ios));
        assert!(!answers.wants(Platform::Android));
    }

    #[test]
    fn test_answers_deserialize_camel_case() {
        let answers: Answers =
            serde_json::from_str(r#"{"platforms": ["android"], "authToken": "secret"}"#).unwrap();
        assert_eq!(answers.platforms, vec![Platform::Android]);
        assert_eq!(answers.auth_token.as_deref(), Some("secret"));
        assert!(!answers.uninstall);
    }
}
