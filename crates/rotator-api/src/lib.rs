// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

// Rotator REST API Layer
//
// Axum transport over the rotator service layer: `/quote`, `/image`,
// `/health` and the generated OpenAPI document.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod common;
pub mod endpoints;
pub mod middleware;
pub mod openapi;
pub mod transports;

// Re-export commonly used types
pub use common::{ApiError, ApiErrorCode, ApiResult, HealthResponse, QuoteResponse};
pub use transports::http::server::{bind, create_http_server, serve, ApiState, ServerError};
