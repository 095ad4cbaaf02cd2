//! Service configuration, loaded from a TOML file.
//!
//! Every section except `[pricing]` has defaults. The unit price has no
//! compiled-in fallback: the configured value is the only source of truth.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::domain::{Pricing, MAX_UNIT_PRICE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Parse(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.message().to_string())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub pricing: PricingConfig,
    #[serde(default)]
    pub actors: ActorConfig,
    #[serde(default)]
    pub schedules: ScheduleConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PricingConfig {
    /// Price of one can in whole currency units.
    pub unit_price: u64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "INR".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActorConfig {
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_buffer_size() -> usize {
    32
}

fn default_request_timeout_ms() -> u64 {
    5000
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            buffer_size: default_buffer_size(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_schedules_enabled")]
    pub enabled: bool,
    #[serde(default = "default_materialize_interval_secs")]
    pub materialize_interval_secs: u64,
}

fn default_schedules_enabled() -> bool {
    true
}

fn default_materialize_interval_secs() -> u64 {
    300
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            enabled: default_schedules_enabled(),
            materialize_interval_secs: default_materialize_interval_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        contents.parse()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.pricing.unit_price == 0 {
            return Err(ConfigError::Validation("pricing.unit_price must be positive".into()));
        }
        if self.pricing.unit_price > MAX_UNIT_PRICE {
            return Err(ConfigError::Validation(format!(
                "pricing.unit_price must be at most {MAX_UNIT_PRICE}"
            )));
        }
        if self.pricing.currency.trim().is_empty() {
            return Err(ConfigError::Validation("pricing.currency cannot be empty".into()));
        }
        if self.actors.buffer_size == 0 {
            return Err(ConfigError::Validation("actors.buffer_size must be positive".into()));
        }
        if self.actors.request_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "actors.request_timeout_ms must be positive".into(),
            ));
        }
        if self.schedules.enabled && self.schedules.materialize_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "schedules.materialize_interval_secs must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn pricing(&self) -> Pricing {
        Pricing::new(self.pricing.unit_price)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.actors.request_timeout_ms)
    }

    pub fn materialize_interval(&self) -> Duration {
        Duration::from_secs(self.schedules.materialize_interval_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}
