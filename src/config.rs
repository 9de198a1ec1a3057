//! # Configuration Management
//!
//! Centralized configuration for the validator and its logging.
//!
//! Configuration only affects how the validator reports (labels, logging,
//! metrics). The transition table and the message grammars are fixed by the
//! protocol and cannot be configured.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - TOML strings via `from_toml()`
//! - Environment variables via `from_env()`
//! - Direct instantiation with defaults

use crate::error::{constants, ProtocolError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::Level;

/// Protocol revision implemented by this crate
pub const PROTOCOL_NAME: &str = "SPLPv1";

/// Default cap on how much rejected text is written to logs
pub const DEFAULT_MAX_LOGGED_TEXT_LEN: usize = 256;

/// Main configuration structure that contains all configurable settings
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ValidatorConfig {
    /// Per-session validator settings
    #[serde(default)]
    pub validator: SessionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ValidatorConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ProtocolError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_READ))
        })?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content).map_err(|e| {
            ProtocolError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_PARSE))
        })
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(label) = std::env::var("SPLP_SESSION_LABEL") {
            config.validator.session_label = label;
        }

        if let Ok(flag) = std::env::var("SPLP_LOG_MESSAGE_TEXT") {
            config.validator.log_message_text = parse_bool("SPLP_LOG_MESSAGE_TEXT", &flag)?;
        }

        if let Ok(flag) = std::env::var("SPLP_COLLECT_METRICS") {
            config.validator.collect_metrics = parse_bool("SPLP_COLLECT_METRICS", &flag)?;
        }

        if let Ok(level) = std::env::var("SPLP_LOG_LEVEL") {
            config.logging.log_level = level.parse::<Level>().map_err(|_| {
                ProtocolError::ConfigError(format!("Invalid SPLP_LOG_LEVEL: {level}"))
            })?;
        }

        Ok(config)
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            ProtocolError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_SERIALIZE))
        })?;

        std::fs::write(path, content).map_err(|e| {
            ProtocolError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_WRITE))
        })?;

        Ok(())
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(self.validator.validate());
        errors.extend(self.logging.validate());
        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ProtocolError::ConfigError(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

fn parse_bool(var: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ProtocolError::ConfigError(format!(
            "Invalid boolean for {var}: {value}"
        ))),
    }
}

/// Per-session validator settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Label attached to every log line of the session
    pub session_label: String,

    /// Whether rejected message text is written to logs
    pub log_message_text: bool,

    /// Maximum number of bytes of rejected text written to logs
    pub max_logged_text_len: usize,

    /// Whether `Validator::from_config` attaches a metrics collector
    pub collect_metrics: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_label: String::from("session"),
            log_message_text: false,
            max_logged_text_len: DEFAULT_MAX_LOGGED_TEXT_LEN,
            collect_metrics: false,
        }
    }
}

impl SessionConfig {
    /// Validate session configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.session_label.is_empty() {
            errors.push("Session label cannot be empty".to_string());
        } else if self.session_label.len() > 64 {
            errors.push(format!(
                "Session label too long: {} characters (maximum: 64)",
                self.session_label.len()
            ));
        }

        if self.log_message_text && self.max_logged_text_len == 0 {
            errors.push(
                "max_logged_text_len must be greater than 0 when log_message_text is enabled"
                    .to_string(),
            );
        }

        errors
    }

    /// Prefix of `text` no longer than `max_logged_text_len`, cut on a char boundary
    pub fn truncate_for_log<'a>(&self, text: &'a str) -> &'a str {
        if text.len() <= self.max_logged_text_len {
            return text;
        }
        let mut end = self.max_logged_text_len;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        &text[..end]
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Application name for logs
    pub app_name: String,

    /// Log level
    #[serde(with = "log_level_serde")]
    pub log_level: Level,

    /// Whether to log to console
    pub log_to_console: bool,

    /// Whether to use JSON formatting for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("splp-validator"),
            log_level: Level::INFO,
            log_to_console: true,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.app_name.is_empty() {
            errors.push("Application name cannot be empty".to_string());
        } else if self.app_name.len() > 64 {
            errors.push(format!(
                "Application name too long: {} characters (maximum: 64)",
                self.app_name.len()
            ));
        }

        if self.json_format && !self.log_to_console {
            errors.push("json_format has no effect when log_to_console is disabled".to_string());
        }

        errors
    }
}

/// Helper module for tracing::Level serialization/deserialization
mod log_level_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let level_str = match *level {
            Level::TRACE => "trace",
            Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        };
        level_str.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        Level::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}
