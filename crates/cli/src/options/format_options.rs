use clap::ValueEnum;

/// CLI output format selection.
///
/// Controls whether commands print colored lines or JSON for scripts and CI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FormatOptions {
    /// JSON format for CI/CD pipelines
    #[value(name = "json")]
    Json,
    /// Human-readable colored terminal output
    #[default]
    #[value(name = "stdout")]
    Stdout,
}

impl FormatOptions {
    pub fn print(&self, stdout_msg: &str, json_msg: &str) {
        match self {
            Self::Stdout => println!("{stdout_msg}"),
            Self::Json => println!("{json_msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("json", Some(FormatOptions::Json))]
    #[case("stdout", Some(FormatOptions::Stdout))]
    #[case("JSON", Some(FormatOptions::Json))]
    #[case("yaml", None)]
    fn test_format_options_from_str(#[case] input: &str, #[case] expected: Option<FormatOptions>) {
        assert_eq!(FormatOptions::from_str(input, true).ok(), expected);
    }

    #[test]
    fn test_format_options_default() {
        assert_eq!(FormatOptions::default(), FormatOptions::Stdout);
    }
}
