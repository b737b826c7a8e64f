//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, Duration};
use crate::domain::dictation::UiLanguage;
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => {
            presenter.output(&store.path().to_string_lossy());
            Ok(())
        }
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;
    let value = value.trim();

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;
    store.save(&config).await?;

    presenter.success(&format!("{} = {}", key, value));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;
    let config = store.load().await?;
    presenter.output(read_value(&config, key).as_deref().unwrap_or(NOT_SET));
    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;
    for key in VALID_CONFIG_KEYS {
        presenter.key_value(key, read_value(&config, key).as_deref().unwrap_or(NOT_SET));
    }
    Ok(())
}

fn ensure_known_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

/// Validate `value` for `key` and store it in normalized form
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "service_url" => {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(invalid(
                    "URL must start with http:// or https://".to_string(),
                ));
            }
            config.service_url = Some(value.trim_end_matches('/').to_string());
        }
        "language" => {
            let language: UiLanguage = value.parse().map_err(|e| invalid(format!("{e}")))?;
            config.language = Some(language.code().to_string());
        }
        "timeout" => {
            let timeout: Duration = value.parse().map_err(|e| invalid(format!("{e}")))?;
            config.timeout = Some(timeout.to_string());
        }
        "history" => {
            let enabled = parse_bool(value)
                .ok_or_else(|| invalid("Value must be 'true' or 'false'".to_string()))?;
            config.history = Some(enabled);
        }
        "user_id" => {
            if value.is_empty() {
                return Err(invalid("User id must not be empty".to_string()));
            }
            config.user_id = Some(value.to_string());
        }
        _ => return Err(invalid("Unknown key".to_string())),
    }
    Ok(())
}

fn read_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "service_url" => config.service_url.clone(),
        "language" => config.language.clone(),
        "timeout" => config.timeout.clone(),
        "history" => config.history.map(|b| b.to_string()),
        "user_id" => config.user_id.clone(),
        _ => None,
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(key: &str, value: &str) -> Result<AppConfig, ConfigError> {
        let mut config = AppConfig::empty();
        apply_value(&mut config, key, value)?;
        Ok(config)
    }

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("No"), Some(false));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn language_is_normalized_to_code() {
        assert_eq!(set("language", "Tamil").unwrap().language.as_deref(), Some("ta"));
        assert!(set("language", "fr").is_err());
    }

    #[test]
    fn timeout_is_normalized() {
        assert_eq!(set("timeout", "90s").unwrap().timeout.as_deref(), Some("1m30s"));
        assert!(set("timeout", "0s").is_err());
        assert!(set("timeout", "soon").is_err());
    }

    #[test]
    fn service_url_requires_http_scheme() {
        assert_eq!(
            set("service_url", "https://legal.example/api/").unwrap().service_url.as_deref(),
            Some("https://legal.example/api")
        );
        assert!(set("service_url", "legal.example").is_err());
    }

    #[test]
    fn history_and_user_id() {
        assert_eq!(set("history", "yes").unwrap().history, Some(true));
        assert!(set("history", "sometimes").is_err());
        assert!(set("user_id", "").is_err());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = ensure_known_key("api_key").unwrap_err();
        assert!(err.to_string().contains("service_url"));
    }

    #[test]
    fn read_value_round_trips_set_value() {
        let config = set("history", "false").unwrap();
        assert_eq!(read_value(&config, "history").as_deref(), Some("false"));
        assert_eq!(read_value(&config, "language"), None);
    }
}
