use symwiz_core::{Answers, Properties, PropertiesProvider};

/// Writes answers in the `sentry.properties` format read by `sentry-cli`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SentryCliProperties;

impl PropertiesProvider for SentryCliProperties {
    fn convert_answers(&self, answers: &Answers) -> Properties {
        [
            ("defaults.url", &answers.url),
            ("defaults.org", &answers.org),
            ("defaults.project", &answers.project),
            ("auth.token", &answers.auth_token),
        ]
        .into_iter()
        .filter_map(|(key, value)| Some((key.to_string(), value.clone()?)))
        .collect()
    }

    fn dump_properties(&self, properties: &Properties) -> String {
        properties
            .iter()
            .map(|(key, value)| format!("{key}={}\n", escape_value(value)))
            .collect()
    }
}

/// Escapes a value so a `.properties` reader gets it back unchanged on one line.
fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for (index, c) in value.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{c}' => out.push_str("\\f"),
            ' ' if index == 0 => out.push_str("\\ "),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use symwiz_core::Platform;

    #[test]
    fn test_convert_answers_omits_missing_values() {
        let answers = Answers {
            platforms: vec![Platform::Ios],
            url: Some("https://sentry.io/".to_string()),
            org: Some("acme".to_string()),
            ..Default::default()
        };
        let properties = SentryCliProperties.convert_answers(&answers);
        assert_eq!(properties.len(), 2);
        assert_eq!(properties["defaults.org"], "acme");
        assert!(!properties.contains_key("auth.token"));
    }

    #[test]
    fn test_dump_properties_sorted() {
        let answers = Answers {
            url: Some("https://sentry.io/".to_string()),
            org: Some("acme".to_string()),
            project: Some("app".to_string()),
            auth_token: Some("secret".to_string()),
            ..Default::default()
        };
        let provider = SentryCliProperties;
        let text = provider.dump_properties(&provider.convert_answers(&answers));
        assert_eq!(
            text,
            "auth.token=secret\n\
             defaults.org=acme\n\
             defaults.project=app\n\
             defaults.url=https://sentry.io/\n"
        );
    }

    #[rstest]
    #[case("acme", "acme")]
    #[case("https://sentry.io/", "https://sentry.io/")]
    #[case("C:\\sentry", "C:\\\\sentry")]
    #[case("a\nauth.token=stolen", "a\\nauth.token=stolen")]
    #[case("tab\there\r", "tab\\there\\r")]
    #[case(" padded", "\\ padded")]
    #[case("bell\u{7}", "bell\\u0007")]
    fn test_escape_value(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(escape_value(value), expected);
    }

    #[test]
    fn test_dump_keeps_one_line_per_key() {
        let answers = Answers {
            org: Some("acme\nauth.token=stolen".to_string()),
            ..Default::default()
        };
        let provider = SentryCliProperties;
        let text = provider.dump_properties(&provider.convert_answers(&answers));
        assert_eq!(text, "defaults.org=acme\\nauth.token=stolen\n");
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_dump_empty() {
        assert_eq!(SentryCliProperties.dump_properties(&Properties::new()), "");
    }
}
