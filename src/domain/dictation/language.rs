//! UI language value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::InvalidLanguageError;

/// All supported UI languages
pub const ALL_LANGUAGES: &[UiLanguage] = &[UiLanguage::English, UiLanguage::Tamil];

/// Active UI language.
///
/// Passed around as an explicit context value. Dictation copies it when a
/// session begins, so later language switches never reach a running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UiLanguage {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ta")]
    Tamil,
}

impl UiLanguage {
    /// Short language code
    pub const fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Tamil => "ta",
        }
    }

    /// Speech recognition locale for this language
    pub const fn recognition_locale(&self) -> &'static str {
        match self {
            Self::English => "en-US",
            Self::Tamil => "ta-IN",
        }
    }

    /// Human-readable label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Tamil => "தமிழ்",
        }
    }
}

impl FromStr for UiLanguage {
    type Err = InvalidLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Self::English),
            "ta" | "tamil" => Ok(Self::Tamil),
            _ => Err(InvalidLanguageError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for UiLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
