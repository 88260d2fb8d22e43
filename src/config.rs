use std::{path::PathBuf, str::FromStr};

use chrono_tz::Tz;
use shuttle_runtime::SecretStore;
use url::Url;

use crate::service::autoreply::parse_timezone;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing {0}")]
    Missing(&'static str),
    #[error("Invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub telegram: TelegramConfig,
    pub llm: LlmConfig,
    pub storage: StorageConfig,
    pub default_timezone: Tz,
}

#[derive(Clone, Debug)]
pub struct TelegramConfig {
    pub token: String,
    /// Public base URL; when set, updates arrive by webhook instead of long polling.
    pub webhook_url: Option<Url>,
}

impl TelegramConfig {
    /// `<base>/webhook/<secret part of the token>`.
    pub fn webhook_endpoint(&self) -> Option<Result<Url, ConfigError>> {
        let base = self.webhook_url.as_ref()?;
        let secret = self.token.split_once(':').map_or(self.token.as_str(), |(_, secret)| secret);
        Some(
            base.join(&format!("webhook/{}", secret))
                .map_err(|e| ConfigError::Invalid {
                    key: "WEBHOOK_URL",
                    reason: e.to_string(),
                }),
        )
    }
}

#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub database_path: PathBuf,
}

pub fn build_config(secret_store: &SecretStore) -> Result<AppConfig, ConfigError> {
    build_config_from(|key| secret_store.get(key))
}

fn build_config_from<F>(get: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    info!("Building AppConfig...");

    let required = |key: &'static str| get(key).filter(|v| !v.trim().is_empty()).ok_or(ConfigError::Missing(key));
    let or_default = |key: &'static str, default: &str| get(key).unwrap_or_else(|| default.to_string());

    let webhook_url = match get("WEBHOOK_URL").filter(|v| !v.trim().is_empty()) {
        Some(raw) => Some(with_trailing_slash(&raw).map_err(|e| ConfigError::Invalid {
            key: "WEBHOOK_URL",
            reason: e.to_string(),
        })?),
        None => None,
    };

    let default_timezone =
        parse_timezone(&or_default("DEFAULT_TIMEZONE", "Europe/Moscow")).map_err(|e| ConfigError::Invalid {
            key: "DEFAULT_TIMEZONE",
            reason: e.to_string(),
        })?;

    let config = AppConfig {
        telegram: TelegramConfig {
            token: required("TELEGRAM_BOT_TOKEN")?,
            webhook_url,
        },
        llm: LlmConfig {
            api_key: required("DEEPSEEK_API_KEY")?,
            base_url: or_default("DEEPSEEK_BASE_URL", "https://api.deepseek.com/v1"),
            model: or_default("DEEPSEEK_MODEL", "deepseek-chat"),
            max_tokens: parse_or("DEEPSEEK_MAX_TOKENS", get("DEEPSEEK_MAX_TOKENS"), 300)?,
            temperature: parse_or("DEEPSEEK_TEMPERATURE", get("DEEPSEEK_TEMPERATURE"), 0.7)?,
            timeout_secs: parse_or("DEEPSEEK_TIMEOUT_SECS", get("DEEPSEEK_TIMEOUT_SECS"), 30)?,
        },
        storage: StorageConfig {
            database_path: PathBuf::from(or_default("DATABASE_PATH", "mary_database.json")),
        },
        default_timezone,
    };

    info!("AppConfig built");
    Ok(config)
}

fn parse_or<T>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

fn with_trailing_slash(raw: &str) -> Result<Url, url::ParseError> {
    let raw = raw.trim();
    if raw.ends_with('/') {
        Url::parse(raw)
    } else {
        Url::parse(&format!("{}/", raw))
    }
}

#[cfg(test)]
impl LlmConfig {
    pub fn test() -> Self {
        Self {
            api_key: "test-key".to_string(),
            base_url: "http://localhost:0/v1".to_string(),
            model: "deepseek-chat".to_string(),
            max_tokens: 300,
            temperature: 0.7,
            timeout_secs: 5,
        }
    }
}

#[cfg(test)]
impl AppConfig {
    pub fn new_test_config(database_path: PathBuf) -> Self {
        Self {
            telegram: TelegramConfig {
                token: "1234567890:QWERTYUIOPASDFGHJKLZXCVBNMQWERTYUIO".to_string(),
                webhook_url: None,
            },
            llm: LlmConfig::test(),
            storage: StorageConfig { database_path },
            default_timezone: chrono_tz::Europe::Moscow,
        }
    }
}
