//! Language definitions for the bilingual (English/Malayalam) shop assistant

use serde::{Deserialize, Serialize};

/// Languages the voice assistant understands.
///
/// The surrounding app lets the shopkeeper pick one of these at startup;
/// every dictionary, keyword set and message template is keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Malayalam,
}

impl Language {
    /// BCP-47 code used when configuring the speech recognizer.
    pub fn bcp47(&self) -> &'static str {
        match self {
            Language::English => "en-US",
            Language::Malayalam => "ml-IN",
        }
    }

    /// Short ISO 639-1 code used in dictionary entries.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Malayalam => "ml",
        }
    }

    pub fn is_english(&self) -> bool {
        matches!(self, Language::English)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "en-us" | "english" => Ok(Language::English),
            "ml" | "ml-in" | "malayalam" => Ok(Language::Malayalam),
            other => Err(format!("unknown language: {other}")),
        }
    }
}
