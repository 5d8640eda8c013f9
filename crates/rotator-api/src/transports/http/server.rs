// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

// HTTP server implementation (Axum)
//
// This module sets up the HTTP API server with Axum, including routing,
// middleware, state management and bounded graceful shutdown.

use axum::{
    http::Uri,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use utoipa::OpenApi;

use crate::common::ApiError;
use crate::endpoints::{health, image, quote};
use crate::middleware::create_cors_layer;
use crate::openapi::ApiDoc;
use rotator_services::ContentService;

/// Application state shared across all HTTP handlers
#[derive(Clone)]
pub struct ApiState {
    pub content_service: Arc<dyn ContentService + Send + Sync>,
    /// Session timestamp in milliseconds (Unix timestamp when the process started)
    pub session_timestamp: i64,
}

impl ApiState {
    pub fn new(content_service: Arc<dyn ContentService + Send + Sync>) -> Self {
        Self {
            content_service,
            session_timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// HTTP server lifecycle errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server error: {0}")]
    Serve(#[from] std::io::Error),

    #[error("In-flight requests did not finish within {0:?}")]
    ShutdownTimeout(Duration),
}

/// Create the main HTTP server application
pub fn create_http_server(state: ApiState) -> Router {
    Router::new()
        .route("/quote", get(quote::get_quote))
        .route("/image", get(image::get_image))
        .route("/health", get(health::health_check))
        // OpenAPI spec endpoint
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .fallback(not_found)
        .with_state(state)
        .layer(create_cors_layer())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::span!(
                        target: "rotator-api",
                        tracing::Level::DEBUG,
                        "request",
                        method = %request.method(),
                        uri = %request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &axum::http::Request<_>, _span: &tracing::Span| {
                    tracing::debug!(target: "rotator-api", "Incoming request: {} {}", request.method(), request.uri());
                })
                .on_response(|response: &axum::http::Response<_>, latency: Duration, _span: &tracing::Span| {
                    tracing::debug!(
                        target: "rotator-api",
                        "Response: status={}, latency={:?}",
                        response.status(),
                        latency
                    );
                })
                .on_failure(|error: tower_http::classify::ServerErrorsFailureClass, latency: Duration, _span: &tracing::Span| {
                    tracing::error!(target: "rotator-api", "Request failed: {}, latency={:?}", error, latency);
                }),
        )
}

async fn not_found(uri: Uri) -> impl IntoResponse {
    warn!(target: "rotator-api", "Unmatched request: {}", uri);
    ApiError::not_found("route", uri.path())
}

/// Bind the listener; failure here is fatal at startup.
pub async fn bind(address: &str) -> Result<TcpListener, ServerError> {
    TcpListener::bind(address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.to_string(),
            source,
        })
}

/// Serve `router` until `shutdown` is cancelled, then drain for at most `grace`.
///
/// # Errors
/// * `ServerError::Serve` - the accept loop failed
/// * `ServerError::ShutdownTimeout` - connections were still open when the
///   grace period ran out
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: CancellationToken,
    grace: Duration,
) -> Result<(), ServerError> {
    if let Ok(addr) = listener.local_addr() {
        info!(target: "rotator-api", "Listening on http://{}", addr);
    }

    let signal = shutdown.clone();
    let server = axum::serve(listener, router)
        .with_graceful_shutdown(async move { signal.cancelled().await })
        .into_future();
    let mut server = std::pin::pin!(server);

    tokio::select! {
        result = &mut server => return result.map_err(ServerError::Serve),
        _ = shutdown.cancelled() => {}
    }

    info!(target: "rotator-api", "Draining in-flight requests (grace {:?})", grace);
    match tokio::time::timeout(grace, server).await {
        Ok(result) => {
            info!(target: "rotator-api", "HTTP server stopped");
            result.map_err(ServerError::Serve)
        }
        Err(_) => Err(ServerError::ShutdownTimeout(grace)),
    }
}
