//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use crate::telemetry::TracingConfig;
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub typing: TypingConfig,
    pub gateway: GatewayConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Tracing preset matching this environment
    #[must_use]
    pub fn tracing_config(&self) -> TracingConfig {
        match self {
            Self::Development => TracingConfig::development(),
            Self::Staging => TracingConfig::default(),
            Self::Production => TracingConfig::production(),
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Typing presence configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TypingConfig {
    /// Debounce / expiry interval in milliseconds
    #[serde(default = "default_typing_timeout_ms")]
    pub timeout_ms: u64,
    /// Buffer size of the outbound and inbound message channels
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer: usize,
}

impl TypingConfig {
    /// Debounce / expiry interval
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_typing_timeout_ms(),
            channel_buffer: default_channel_buffer(),
        }
    }
}

/// Messaging gateway the client connects to
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_gateway_url")]
    pub url: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            url: default_gateway_url(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "typing-presence".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_typing_timeout_ms() -> u64 {
    3000
}

fn default_channel_buffer() -> usize {
    64
}

fn default_gateway_url() -> String {
    "ws://127.0.0.1:8081/gateway".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: default_env(),
            },
            typing: TypingConfig::default(),
            gateway: GatewayConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is present but holds an invalid value
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// Missing keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_ms = match lookup("TYPING_TIMEOUT_MS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) | Err(_) => return Err(ConfigError::InvalidValue("TYPING_TIMEOUT_MS", raw)),
                Ok(ms) => ms,
            },
            None => default_typing_timeout_ms(),
        };

        let channel_buffer = match lookup("TYPING_CHANNEL_BUFFER") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(0) | Err(_) => {
                    return Err(ConfigError::InvalidValue("TYPING_CHANNEL_BUFFER", raw))
                }
                Ok(size) => size,
            },
            None => default_channel_buffer(),
        };

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            typing: TypingConfig {
                timeout_ms,
                channel_buffer,
            },
            gateway: GatewayConfig {
                url: lookup("GATEWAY_URL").unwrap_or_else(default_gateway_url),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

/// Read a required variable from the environment
///
/// # Errors
/// Returns `ConfigError::MissingVar` if the variable is unset or blank
pub fn required_var(key: &'static str) -> Result<String, ConfigError> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingVar(key))
}
