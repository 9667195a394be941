//! Configuration structs

mod app_config;

pub use app_config::{
    required_var, AppConfig, AppSettings, ConfigError, Environment, GatewayConfig, TypingConfig,
};
