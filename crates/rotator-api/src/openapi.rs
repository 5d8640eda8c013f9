// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

// OpenAPI documentation generation
//
// Generated at compile time with utoipa from the handler annotations.

use utoipa::OpenApi;

use crate::common::{ApiError, ApiErrorCode, HealthResponse, QuoteResponse};

/// OpenAPI documentation for the Rotator REST API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rotator REST API",
        description = "Serves quotes and images in shuffled round-robin order",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0"
        )
    ),
    servers(
        (url = "http://localhost:14467", description = "Local default port")
    ),
    paths(
        crate::endpoints::quote::get_quote,
        crate::endpoints::image::get_image,
        crate::endpoints::health::health_check,
    ),
    components(
        schemas(
            QuoteResponse,
            HealthResponse,
            ApiError,
            ApiErrorCode,
        )
    ),
    tags(
        (name = "content", description = "Rotating quotes and images"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_content_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/quote"));
        assert!(doc.paths.paths.contains_key("/image"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
