// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base values, optional)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, RotatorConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "rotator_configuration.toml";

/// Environment variable pointing at an explicit configuration file
pub const CONFIG_PATH_ENV: &str = "ROTATOR_CONFIG_PATH";

/// Find the rotator configuration file
///
/// Search order:
/// 1. `ROTATOR_CONFIG_PATH` environment variable
/// 2. Current working directory: `./rotator_configuration.toml`
/// 3. Up to 5 parent directories
///
/// Returns `Ok(None)` when nothing was found and no explicit path was requested.
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if `ROTATOR_CONFIG_PATH` names a missing file
pub fn find_config_file() -> ConfigResult<Option<PathBuf>> {
    if let Ok(env_path) = env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(Some(path));
        }
        return Err(ConfigError::FileNotFound(format!(
            "file specified by {} does not exist: {}",
            CONFIG_PATH_ENV,
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));

        let mut current = cwd.as_path();
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent;
                }
                None => break,
            }
        }
    }

    Ok(search_paths.into_iter().find(|path| path.exists()))
}

/// Load configuration
///
/// # Arguments
///
/// * `config_path` - Optional explicit path to a config file. If `None`, the file is searched for
///   and built-in defaults are used when none exists.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if an explicit config file is missing, contains invalid TOML, or an override
/// carries an unparsable value
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<RotatorConfig> {
    let config_file = match config_path {
        Some(path) if !path.exists() => {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file()?,
    };

    let mut config = match config_file {
        Some(file) => {
            let content = fs::read_to_string(&file)?;
            toml::from_str(&content)?
        }
        None => RotatorConfig::default(),
    };

    apply_environment_overrides(&mut config)?;

    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli)?;
    }

    // Levels compare case-insensitively whichever layer set them
    config.logging.level = config.logging.level.to_lowercase();

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `ROTATOR_HOST` -> `server.host`
/// - `ROTATOR_PORT`, `PORT` -> `server.port`
/// - `ROTATOR_SHUTDOWN_GRACE_SECS` -> `server.shutdown_grace_secs`
/// - `ROTATOR_IMAGE_DIR`, `IMAGE_DIR` -> `content.image_dir`
/// - `ROTATOR_RESHUFFLE_INTERVAL_SECS` -> `scheduler.reshuffle_interval_secs`
/// - `ROTATOR_LOG_LEVEL` -> `logging.level`
/// - `ROTATOR_LOG_DIR` -> `logging.log_dir`
///
/// `PORT` and `IMAGE_DIR` take precedence over their `ROTATOR_` prefixed forms. Empty values
/// are treated as unset.
pub fn apply_environment_overrides(config: &mut RotatorConfig) -> ConfigResult<()> {
    apply_overrides_from(config, |key| env::var(key).ok())
}

/// Apply overrides from an arbitrary key lookup (environment-style names)
pub fn apply_overrides_from<F>(config: &mut RotatorConfig, lookup: F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

    if let Some(value) = get("ROTATOR_HOST") {
        config.server.host = value;
    }
    for key in ["ROTATOR_PORT", "PORT"] {
        if let Some(value) = get(key) {
            config.server.port = parse_value(key, &value)?;
        }
    }
    if let Some(value) = get("ROTATOR_SHUTDOWN_GRACE_SECS") {
        config.server.shutdown_grace_secs = parse_value("ROTATOR_SHUTDOWN_GRACE_SECS", &value)?;
    }

    for key in ["ROTATOR_IMAGE_DIR", "IMAGE_DIR"] {
        if let Some(value) = get(key) {
            config.content.image_dir = PathBuf::from(value);
        }
    }

    if let Some(value) = get("ROTATOR_RESHUFFLE_INTERVAL_SECS") {
        config.scheduler.reshuffle_interval_secs =
            parse_value("ROTATOR_RESHUFFLE_INTERVAL_SECS", &value)?;
    }

    if let Some(value) = get("ROTATOR_LOG_LEVEL") {
        config.logging.level = value.to_lowercase();
    }
    if let Some(value) = get("ROTATOR_LOG_DIR") {
        config.logging.log_dir = Some(PathBuf::from(value));
    }

    Ok(())
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"port": "9000", "image_dir": "/srv/img"}`)
pub fn apply_cli_overrides(
    config: &mut RotatorConfig,
    cli_args: &HashMap<String, String>,
) -> ConfigResult<()> {
    if let Some(value) = cli_args.get("host") {
        config.server.host = value.clone();
    }
    if let Some(value) = cli_args.get("port") {
        config.server.port = parse_value("port", value)?;
    }
    if let Some(value) = cli_args.get("shutdown_grace_secs") {
        config.server.shutdown_grace_secs = parse_value("shutdown_grace_secs", value)?;
    }
    if let Some(value) = cli_args.get("image_dir") {
        config.content.image_dir = PathBuf::from(value);
    }
    if let Some(value) = cli_args.get("reshuffle_interval_secs") {
        config.scheduler.reshuffle_interval_secs = parse_value("reshuffle_interval_secs", value)?;
    }
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.to_lowercase();
    }
    if let Some(value) = cli_args.get("log_dir") {
        config.logging.log_dir = Some(PathBuf::from(value));
    }

    Ok(())
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> ConfigResult<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidValue(format!("{} = '{}'", key, value)))
}
