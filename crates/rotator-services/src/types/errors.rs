// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Service layer error types.

Transport-agnostic errors that adapters map to HTTP status codes.
*/

use std::path::Path;
use thiserror::Error;

/// Service layer errors (transport-agnostic)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// A content sequence would be empty (startup fault)
    #[error("No content available: {0}")]
    EmptyContent(String),

    /// The secure random source could not produce bytes
    #[error("Secure random source unavailable: {0}")]
    RandomSource(String),

    /// Filesystem failure
    #[error("I/O error on '{path}': {message}")]
    Io { path: String, message: String },

    /// Invalid input parameters (400 in HTTP)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal service error (500 in HTTP)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn io(path: &Path, err: &std::io::Error) -> Self {
        ServiceError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<rand::Error> for ServiceError {
    fn from(err: rand::Error) -> Self {
        ServiceError::RandomSource(err.to_string())
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
