// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use utoipa::ToSchema;

/// API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApiErrorCode {
    NotFound,
    InvalidInput,
    Internal,
    ServiceUnavailable,
}

impl ApiErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ApiErrorCode::NotFound => StatusCode::NOT_FOUND,
            ApiErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
            ApiErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// API error type
#[derive(Debug, Error, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Error detail message
    pub detail: String,

    /// Error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ApiErrorCode>,

    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.detail)
    }
}

impl ApiError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            code: None,
            details: None,
        }
    }

    pub fn with_code(mut self, code: ApiErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn not_found(resource: impl Into<String>, id: impl Into<String>) -> Self {
        let resource = resource.into();
        let id = id.into();
        Self::new(format!("{} '{}' not found", resource, id))
            .with_code(ApiErrorCode::NotFound)
            .with_details(serde_json::json!({
                "resource": resource,
                "id": id
            }))
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(message).with_code(ApiErrorCode::InvalidInput)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(message).with_code(ApiErrorCode::Internal)
    }

    pub fn service_unavailable(service: impl Into<String>) -> Self {
        Self::new(format!("Service unavailable: {}", service.into()))
            .with_code(ApiErrorCode::ServiceUnavailable)
    }

    /// HTTP status for this error; errors without a code are internal
    pub fn status(&self) -> StatusCode {
        self.code
            .map(ApiErrorCode::status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(target: "rotator-api", "{} {}", status, self.detail);
        }
        (status, Json(self)).into_response()
    }
}

/// Convert service layer errors to API errors
impl From<rotator_services::ServiceError> for ApiError {
    fn from(err: rotator_services::ServiceError) -> Self {
        use rotator_services::ServiceError;

        match err {
            ServiceError::InvalidInput(msg) => ApiError::invalid_input(msg),
            ServiceError::EmptyContent(msg) => ApiError::service_unavailable(msg),
            ServiceError::RandomSource(msg) => ApiError::internal(msg),
            ServiceError::Io { path, message } => ApiError::new(format!("{}: {}", path, message))
                .with_code(ApiErrorCode::Internal)
                .with_details(serde_json::json!({ "path": path })),
            ServiceError::Internal(msg) => ApiError::internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rotator_services::ServiceError;

    #[test]
    fn test_not_found_body() {
        let err = ApiError::not_found("image", "pic.png");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let body = serde_json::to_value(&err).unwrap();
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["detail"], "image 'pic.png' not found");
        assert_eq!(body["details"]["id"], "pic.png");
    }

    #[test]
    fn test_uncoded_error_is_internal() {
        let err = ApiError::new("boom");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = serde_json::to_value(&err).unwrap();
        assert!(body.get("code").is_none());
    }

    #[test]
    fn test_service_error_mapping() {
        let cases = [
            (ServiceError::InvalidInput("bad".into()), StatusCode::BAD_REQUEST),
            (
                ServiceError::EmptyContent("no quotes".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ServiceError::RandomSource("gone".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ServiceError::Io {
                    path: "/x".into(),
                    message: "denied".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (service_err, status) in cases {
            assert_eq!(ApiError::from(service_err).status(), status);
        }
    }
}
