use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_USER: &str = "geometry_user";
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;
pub const CHAT_MESSAGES_PATH: &str = "/chat-messages";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variables: {0}")]
    MissingVariables(String),
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Language of the prompt template and of user-facing error messages.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[serde(rename = "en")]
    En,
    #[default]
    #[serde(rename = "zh-CN")]
    ZhCn,
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en_us" => Ok(Locale::En),
            "zh" | "zh-cn" | "zh_cn" => Ok(Locale::ZhCn),
            _ => Err(ConfigError::InvalidValue {
                key: "locale".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => f.write_str("en"),
            Locale::ZhCn => f.write_str("zh-CN"),
        }
    }
}

/// Connection settings for the completion endpoint.
///
/// `base_url` and `api_key` are passed through as given; checking that they
/// are well formed is left to whoever supplies them.
#[derive(Serialize, Deserialize, Clone)]
pub struct Config {
    pub base_url: String,
    pub api_key: String,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub locale: Locale,
}

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("user", &self.user)
            .field("timeout_ms", &self.timeout_ms)
            .field("locale", &self.locale)
            .finish()
    }
}

impl Config {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            user: default_user(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            locale: Locale::default(),
        }
    }

    /// Reads `API_URL` and `API_KEY` (required) plus the optional
    /// `API_USER`, `API_TIMEOUT_MS` and `SOLIDVIEW_LOCALE`. A `.env` file in
    /// the working directory is loaded first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let required_vars = ["API_URL", "API_KEY"];
        let missing_vars: Vec<&str> = required_vars
            .iter()
            .copied()
            .filter(|var| std::env::var(var).map_or(true, |v| v.trim().is_empty()))
            .collect();
        if !missing_vars.is_empty() {
            return Err(ConfigError::MissingVariables(missing_vars.join(", ")));
        }

        let mut config = Self::new(
            std::env::var("API_URL").unwrap_or_default(),
            std::env::var("API_KEY").unwrap_or_default(),
        );

        if let Ok(user) = std::env::var("API_USER") {
            config.user = user;
        }

        if let Ok(timeout) = std::env::var("API_TIMEOUT_MS") {
            config.timeout_ms = timeout.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "API_TIMEOUT_MS".to_string(),
                value: timeout.clone(),
            })?;
        }

        if let Ok(locale) = std::env::var("SOLIDVIEW_LOCALE") {
            config.locale = locale.parse()?;
        }

        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            CHAT_MESSAGES_PATH
        )
    }
}
