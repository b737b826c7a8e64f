//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::config::Duration;
use crate::domain::dictation::UiLanguage;

/// Default analysis service endpoint
pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:8080";

/// Default owner of the local record log
pub const DEFAULT_USER_ID: &str = "local";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub service_url: Option<String>,
    pub language: Option<String>,
    pub timeout: Option<String>,
    pub history: Option<bool>,
    pub user_id: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            service_url: Some(DEFAULT_SERVICE_URL.to_string()),
            language: Some(UiLanguage::default().code().to_string()),
            timeout: Some(Duration::default_timeout().to_string()),
            history: Some(false),
            user_id: Some(DEFAULT_USER_ID.to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            service_url: other.service_url.or(self.service_url),
            language: other.language.or(self.language),
            timeout: other.timeout.or(self.timeout),
            history: other.history.or(self.history),
            user_id: other.user_id.or(self.user_id),
        }
    }

    /// Service URL without a trailing slash, or the default
    pub fn service_url_or_default(&self) -> String {
        self.service_url
            .as_deref()
            .map(|s| s.trim().trim_end_matches('/'))
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SERVICE_URL)
            .to_string()
    }

    /// Get language as parsed UiLanguage, or default if not set/invalid
    pub fn language_or_default(&self) -> UiLanguage {
        self.language
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get timeout as parsed Duration, or default if not set/invalid
    pub fn timeout_or_default(&self) -> Duration {
        self.timeout
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get history setting, or false if not set
    pub fn history_or_default(&self) -> bool {
        self.history.unwrap_or(false)
    }

    /// Get record log owner, or "local" if not set
    pub fn user_id_or_default(&self) -> &str {
        self.user_id
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_USER_ID)
    }
}
