// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

// Common types used across all endpoints

pub mod error;
pub mod response;

pub use axum::extract::State;
pub use axum::response::Json;

pub use crate::transports::http::server::ApiState;
pub use error::{ApiError, ApiErrorCode};
pub use response::{HealthResponse, QuoteResponse};

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
