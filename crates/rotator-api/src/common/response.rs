// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `GET /quote`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct QuoteResponse {
    /// Quote text
    pub message: String,

    /// Optional link; omitted when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl QuoteResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub quote_count: usize,
    pub image_count: usize,
    /// Shuffles applied since startup, the startup shuffle included
    pub reshuffle_count: u64,
    /// Process start, Unix milliseconds
    pub session_timestamp: i64,
    /// Response time (ISO 8601)
    pub timestamp: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_omits_missing_url() {
        let body = serde_json::to_string(&QuoteResponse::new("Stay curious.")).unwrap();
        assert_eq!(body, r#"{"message":"Stay curious."}"#);
    }

    #[test]
    fn test_quote_with_url() {
        let quote = QuoteResponse::new("See more").with_url("https://example.org");
        let body = serde_json::to_value(&quote).unwrap();
        assert_eq!(body["url"], "https://example.org");
    }
}
