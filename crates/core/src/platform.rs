use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// A mobile platform the wizard can configure.
///
/// Each platform owns a directory (`<platformsDir>/<platform>`) holding its
/// native project and its properties file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Ios, Platform::Android];

    /// Directory name and config key of the platform
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Ios => "iOS".blue().bold(),
                Self::Android => "Android".green().bold(),
            }
        )
    }
}

impl FromStr for Platform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|platform| platform.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("Unknown platform: {s}"))
    }
}
