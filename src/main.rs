// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use rotator::api::{self, ApiState};
use rotator::config::{load_config, validate_config, RotatorConfig};
use rotator::observability::{debug_flags_help, init_logging, parse_debug_flags};
use rotator::services::{ContentRotationService, ReshuffleScheduler};

/// Rotator - serves quotes and images in shuffled round-robin order
#[derive(Parser, Debug)]
#[command(name = "rotator", version, author, long_about = None, after_help = debug_flags_help())]
struct Args {
    /// Path to the configuration file (default: search for rotator_configuration.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen host
    #[arg(long)]
    host: Option<String>,

    /// Listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory scanned once at startup for images
    #[arg(long)]
    image_dir: Option<PathBuf>,

    /// Seconds between reshuffles
    #[arg(long)]
    reshuffle_interval_secs: Option<u64>,

    /// Seconds to wait for in-flight requests on shutdown
    #[arg(long)]
    shutdown_grace_secs: Option<u64>,

    /// Default log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Write rolling JSON logs under this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Enable debug logging for crates (comma-separated, or "all")
    #[arg(long, value_delimiter = ',')]
    debug: Vec<String>,
}

impl Args {
    /// CLI values as config overrides
    fn overrides(&self) -> HashMap<String, String> {
        let mut overrides = HashMap::new();
        if let Some(host) = &self.host {
            overrides.insert("host".to_string(), host.clone());
        }
        if let Some(port) = self.port {
            overrides.insert("port".to_string(), port.to_string());
        }
        if let Some(dir) = &self.image_dir {
            overrides.insert("image_dir".to_string(), dir.display().to_string());
        }
        if let Some(secs) = self.reshuffle_interval_secs {
            overrides.insert("reshuffle_interval_secs".to_string(), secs.to_string());
        }
        if let Some(secs) = self.shutdown_grace_secs {
            overrides.insert("shutdown_grace_secs".to_string(), secs.to_string());
        }
        if let Some(level) = &self.log_level {
            overrides.insert("log_level".to_string(), level.clone());
        }
        if let Some(dir) = &self.log_dir {
            overrides.insert("log_dir".to_string(), dir.display().to_string());
        }
        overrides
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref(), Some(&args.overrides()))
        .context("Failed to load configuration")?;
    validate_config(&config).context("Invalid configuration")?;

    let debug_flags = parse_debug_flags(&args.debug);
    let logging_guard = init_logging(
        &debug_flags,
        &config.logging.level,
        config.logging.log_dir.as_deref(),
    )?;

    info!(target: "rotator-bin", "Rotator v{} starting", env!("CARGO_PKG_VERSION"));
    if debug_flags.any_enabled() {
        info!(
            target: "rotator-bin",
            "Debug logging: {}",
            debug_flags.to_filter_string(&config.logging.level)
        );
    }
    if let Some(run_dir) = logging_guard.log_dir() {
        info!(target: "rotator-bin", "Writing logs to {}", run_dir.display());
    }

    if let Err(e) = run(config).await {
        error!(target: "rotator-bin", "{:#}", e);
        return Err(e);
    }

    info!(target: "rotator-bin", "Shutdown complete");
    Ok(())
}

async fn run(config: RotatorConfig) -> Result<()> {
    // Content must load before anything is bound
    let service = Arc::new(
        ContentRotationService::load(config.content.quotes.clone(), &config.content.image_dir)
            .with_context(|| {
                format!(
                    "Failed to load content from {}",
                    config.content.image_dir.display()
                )
            })?,
    );

    let scheduler = ReshuffleScheduler::new(service.clone(), config.scheduler.reshuffle_interval())
        .context("Invalid reshuffle interval")?;

    let listener = api::bind(&config.server.bind_address()).await?;
    let router = api::create_http_server(ApiState::new(service));

    let cancel = CancellationToken::new();
    let mut server = tokio::spawn(api::serve(
        listener,
        router,
        cancel.clone(),
        config.server.shutdown_grace(),
    ));
    let mut reshuffler = scheduler.spawn(cancel.clone());

    let mut server_result = None;
    let mut reshuffler_result = None;
    tokio::select! {
        _ = shutdown_signal() => {}
        result = &mut server => server_result = Some(result),
        result = &mut reshuffler => {
            warn!(target: "rotator-bin", "Reshuffle scheduler exited, shutting down");
            reshuffler_result = Some(result);
        }
    }
    cancel.cancel();

    let server_result = match server_result {
        Some(result) => result,
        None => server.await,
    };
    let reshuffler_result = match reshuffler_result {
        Some(result) => result,
        None => reshuffler.await,
    };

    reshuffler_result
        .context("Reshuffle scheduler task panicked")?
        .context("Reshuffle scheduler failed")?;
    server_result
        .context("HTTP server task panicked")?
        .context("HTTP server did not shut down cleanly")?;
    Ok(())
}

/// Resolves on SIGINT, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(target: "rotator-bin", "Cannot listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(target: "rotator-bin", "Cannot listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!(target: "rotator-bin", "SIGINT received, shutting down"),
        _ = terminate => info!(target: "rotator-bin", "SIGTERM received, shutting down"),
    }
}
