// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Ensures configuration values are present and within usable ranges before
//! the service starts. All violations are collected and reported together.

use crate::{ConfigError, ConfigResult, RotatorConfig};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - Required fields (host, image directory, quotes)
/// - Positive durations (reshuffle interval, shutdown grace period)
/// - Known log level
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` with details if validation fails
pub fn validate_config(config: &RotatorConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_required_fields(config, &mut errors);
    validate_value_ranges(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn validate_required_fields(config: &RotatorConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.server.host.trim().is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "server.host".to_string(),
        });
    }

    if config.content.image_dir.as_os_str().is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "content.image_dir".to_string(),
        });
    }

    if config.content.quotes.is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "content.quotes".to_string(),
        });
    }
}

fn validate_value_ranges(config: &RotatorConfig, errors: &mut Vec<ConfigValidationError>) {
    if let Some(index) = config.content.quotes.iter().position(|q| q.trim().is_empty()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: format!("content.quotes[{}]", index),
            reason: "quote must not be blank".to_string(),
        });
    }

    if config.scheduler.reshuffle_interval_secs == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "scheduler.reshuffle_interval_secs".to_string(),
            reason: "must be positive".to_string(),
        });
    }

    if config.server.shutdown_grace_secs == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "server.shutdown_grace_secs".to_string(),
            reason: "must be positive".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!("must be one of {}", LOG_LEVELS.join(", ")),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RotatorConfig::default();
        let result = validate_config(&config);
        if let Err(e) = &result {
            eprintln!("Validation error: {}", e);
        }
        assert!(result.is_ok());
    }

    #[test]
    fn test_privileged_port_is_allowed() {
        let mut config = RotatorConfig::default();
        config.server.port = 80;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_missing_required_field() {
        let mut config = RotatorConfig::default();
        config.server.host = String::new();

        let result = validate_config(&config);
        match result {
            Err(ConfigError::ValidationError(msg)) => assert!(msg.contains("server.host")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_quotes() {
        let mut config = RotatorConfig::default();
        config.content.quotes.clear();

        match validate_config(&config) {
            Err(ConfigError::ValidationError(msg)) => assert!(msg.contains("content.quotes")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_quote() {
        let mut config = RotatorConfig::default();
        config.content.quotes = vec!["fine".to_string(), "   ".to_string()];

        match validate_config(&config) {
            Err(ConfigError::ValidationError(msg)) => assert!(msg.contains("content.quotes[1]")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_errors_are_collected() {
        let mut config = RotatorConfig::default();
        config.scheduler.reshuffle_interval_secs = 0;
        config.server.shutdown_grace_secs = 0;
        config.logging.level = "loud".to_string();

        match validate_config(&config) {
            Err(ConfigError::ValidationError(msg)) => {
                assert!(msg.contains("scheduler.reshuffle_interval_secs"));
                assert!(msg.contains("server.shutdown_grace_secs"));
                assert!(msg.contains("logging.level"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
