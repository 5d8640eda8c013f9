// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Unified logging initialization
//!
//! Console output is always on. When a log directory is given (and the
//! `file-logging` feature is enabled) every run also gets its own folder with
//! a daily-rolling JSON log, and old run folders are pruned.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;

const RUN_PREFIX: &str = "run_";
const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Logging initialization result
///
/// Keep it alive for the lifetime of the process; dropping it flushes the
/// file writers.
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run folder receiving file logs, if file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// Initialize logging with console output and optional file output
///
/// Creates a timestamped folder structure when `log_dir` is set:
/// ```text
/// <log_dir>/
///   └── run_20250101_120000/
///       └── rotator.log.2025-01-01
/// ```
///
/// # Arguments
/// * `debug_flags` - Per-crate debug flags for filtering
/// * `default_level` - Level for everything not covered by a debug flag
/// * `log_dir` - Base directory for file logs (`None` = console only)
pub fn init_logging(
    debug_flags: &CrateDebugFlags,
    default_level: &str,
    log_dir: Option<&Path>,
) -> Result<LoggingGuard> {
    let filter = debug_flags.to_filter_string(default_level);

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_filter(build_filter(&filter)?);
    layers.push(console_layer.boxed());

    #[cfg(feature = "file-logging")]
    let mut file_guards = Vec::new();
    #[allow(unused_mut)]
    let mut run_folder = None;

    #[cfg(feature = "file-logging")]
    {
        if let Some(base_log_dir) = log_dir {
            let folder = create_run_folder(base_log_dir)?;
            cleanup_old_logs(base_log_dir, None, None)?;

            let file_appender = tracing_appender::rolling::daily(&folder, "rotator.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            file_guards.push(guard);

            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .json()
                .with_filter(build_filter(&filter)?)
                .boxed();
            layers.push(file_layer);

            run_folder = Some(folder);
        }
    }

    #[cfg(not(feature = "file-logging"))]
    {
        if let Some(base_log_dir) = log_dir {
            eprintln!(
                "Warning: file logging requested ({}) but the file-logging feature is disabled",
                base_log_dir.display()
            );
        }
    }

    Registry::default()
        .with(layers)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guards: file_guards,
        log_dir: run_folder,
    })
}

fn build_filter(filter: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(filter).with_context(|| format!("Invalid log filter '{}'", filter))
}

#[cfg(feature = "file-logging")]
fn create_run_folder(base_log_dir: &Path) -> Result<PathBuf> {
    let timestamp = Utc::now().format(RUN_TIMESTAMP_FORMAT);
    let run_folder = base_log_dir.join(format!("{}{}", RUN_PREFIX, timestamp));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;
    Ok(run_folder)
}

/// Parse the timestamp out of a `run_YYYYmmdd_HHMMSS` folder name
fn parse_run_timestamp(dir_name: &str) -> Option<DateTime<Utc>> {
    let timestamp_str = dir_name.strip_prefix(RUN_PREFIX)?;
    let naive = NaiveDateTime::parse_from_str(timestamp_str, RUN_TIMESTAMP_FORMAT).ok()?;
    Some(Utc.from_utc_datetime(&naive))
}

/// Clean up old run folders based on retention policy
///
/// Removes runs older than `retention_days` (default 30), then keeps only the
/// `retention_runs` (default 10) most recent of what is left. Returns the
/// number of folders removed.
pub fn cleanup_old_logs(
    base_log_dir: &Path,
    retention_days: Option<u64>,
    retention_runs: Option<usize>,
) -> Result<usize> {
    if !base_log_dir.exists() {
        return Ok(0);
    }

    let retention_days = retention_days.unwrap_or(30);
    let retention_runs = retention_runs.unwrap_or(10);
    let cutoff_date = Utc::now() - chrono::Duration::days(retention_days as i64);

    let mut runs: Vec<(PathBuf, DateTime<Utc>)> = Vec::new();
    for entry in std::fs::read_dir(base_log_dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        if let Some(dt) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(parse_run_timestamp)
        {
            runs.push((path, dt));
        }
    }

    // Newest first
    runs.sort_by(|a, b| b.1.cmp(&a.1));

    let mut removed = 0;
    for (index, (path, dt)) in runs.iter().enumerate() {
        if *dt < cutoff_date || index >= retention_runs {
            match std::fs::remove_dir_all(path) {
                Ok(()) => removed += 1,
                Err(e) => eprintln!(
                    "Warning: Failed to remove old log directory {}: {}",
                    path.display(),
                    e
                ),
            }
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_run(base: &Path, at: DateTime<Utc>) -> PathBuf {
        let path = base.join(format!("{}{}", RUN_PREFIX, at.format(RUN_TIMESTAMP_FORMAT)));
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    #[test]
    fn test_parse_run_timestamp() {
        let dt = parse_run_timestamp("run_20250102_030405").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2025-01-02 03:04:05");
        assert!(parse_run_timestamp("run_garbage").is_none());
        assert!(parse_run_timestamp("20250102_030405").is_none());
    }

    #[test]
    fn test_cleanup_missing_dir() {
        let dir = tempdir().unwrap();
        assert_eq!(cleanup_old_logs(&dir.path().join("absent"), None, None).unwrap(), 0);
    }

    #[test]
    fn test_cleanup_keeps_most_recent_runs() {
        let dir = tempdir().unwrap();
        let now = Utc::now();
        let runs: Vec<PathBuf> = (0..5)
            .map(|i| make_run(dir.path(), now - chrono::Duration::minutes(i)))
            .collect();
        let unrelated = dir.path().join("keep_me");
        std::fs::create_dir_all(&unrelated).unwrap();

        let removed = cleanup_old_logs(dir.path(), Some(30), Some(3)).unwrap();

        assert_eq!(removed, 2);
        assert!(runs[0].exists());
        assert!(runs[2].exists());
        assert!(!runs[3].exists());
        assert!(!runs[4].exists());
        assert!(unrelated.exists());
    }

    #[test]
    fn test_cleanup_removes_expired_runs() {
        let dir = tempdir().unwrap();
        let fresh = make_run(dir.path(), Utc::now());
        let stale = make_run(dir.path(), Utc::now() - chrono::Duration::days(45));

        let removed = cleanup_old_logs(dir.path(), Some(30), Some(10)).unwrap();

        assert_eq!(removed, 1);
        assert!(fresh.exists());
        assert!(!stale.exists());
    }
}
