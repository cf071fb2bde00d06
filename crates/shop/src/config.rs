//! Shop configuration loaded from environment variables.

use std::str::FromStr;

use thiserror::Error;

/// How aggregates are stored and loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepositoryStrategy {
    /// Snapshot rows kept current from each topic.
    #[default]
    MaterializedView,
    /// Aggregates folded from the topic history on every load.
    EventSourced,
}

impl FromStr for RepositoryStrategy {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "materialized" | "materialized-view" => Ok(RepositoryStrategy::MaterializedView),
            "event-sourced" | "event_sourced" => Ok(RepositoryStrategy::EventSourced),
            _ => Err(ConfigError::InvalidValue {
                key: "PIZZA_REPOSITORY_STRATEGY",
                value: value.to_string(),
            }),
        }
    }
}

/// Which payment processor adapter to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentProcessorMode {
    /// Requests are recorded; outcomes are reported by hand.
    #[default]
    Manual,
    /// Every payment succeeds as soon as it is requested.
    Approve,
    /// Every payment fails as soon as it is requested.
    Decline,
}

impl FromStr for PaymentProcessorMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "manual" => Ok(PaymentProcessorMode::Manual),
            "approve" => Ok(PaymentProcessorMode::Approve),
            "decline" => Ok(PaymentProcessorMode::Decline),
            _ => Err(ConfigError::InvalidValue {
                key: "PIZZA_PAYMENT_PROCESSOR",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Event-sourced repositories need an event log that retains events")]
    EventSourcedWithoutLog,
}

/// Shop configuration.
///
/// Reads from environment variables:
/// - `PIZZA_REPOSITORY_STRATEGY`: `materialized` (default) or `event-sourced`
/// - `PIZZA_RETAIN_EVENT_LOG`: `true` (default) or `false`
/// - `PIZZA_PAYMENT_PROCESSOR`: `manual` (default), `approve` or `decline`
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub repository_strategy: RepositoryStrategy,
    pub retain_event_log: bool,
    pub payment_processor: PaymentProcessorMode,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, falling back to defaults for
    /// missing keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let repository_strategy = match lookup("PIZZA_REPOSITORY_STRATEGY") {
            Some(value) => value.parse::<RepositoryStrategy>()?,
            None => defaults.repository_strategy,
        };
        let retain_event_log = match lookup("PIZZA_RETAIN_EVENT_LOG") {
            Some(value) => parse_bool("PIZZA_RETAIN_EVENT_LOG", &value)?,
            None => defaults.retain_event_log,
        };
        let payment_processor = match lookup("PIZZA_PAYMENT_PROCESSOR") {
            Some(value) => value.parse::<PaymentProcessorMode>()?,
            None => defaults.payment_processor,
        };

        let config = Self {
            repository_strategy,
            retain_event_log,
            payment_processor,
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects combinations the shop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.repository_strategy == RepositoryStrategy::EventSourced && !self.retain_event_log {
            return Err(ConfigError::EventSourcedWithoutLog);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repository_strategy: RepositoryStrategy::MaterializedView,
            retain_event_log: true,
            payment_processor: PaymentProcessorMode::Manual,
            log_level: "info".to_string(),
        }
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}
