// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # rotator-observability
//!
//! Logging infrastructure shared by every rotator crate.
//!
//! Provides consistent `tracing` setup with per-crate debug flag support.
//! Each crate logs under an explicit target (`target: "rotator-api"`), which
//! is what the debug flags filter on.
//!
//! ## Features
//! - `file-logging` (default): daily-rolling JSON log files per run

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

pub use cli::*;
pub use init::*;

/// Known rotator log targets for debug flags
///
/// The binary logs under `rotator-bin`: EnvFilter matches targets by prefix,
/// so a bare `rotator` target would also cover every library crate.
pub const KNOWN_CRATES: &[&str] = &[
    "rotator-bin",
    "rotator-api",
    "rotator-services",
    "rotator-config",
];
