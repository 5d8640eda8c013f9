// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

// Health check endpoint

use chrono::Utc;

use crate::common::{ApiResult, ApiState, HealthResponse, Json, State};

/// Service health and content counts
///
/// Reads counters only; never advances a rotation.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<ApiState>) -> ApiResult<Json<HealthResponse>> {
    let stats = state.content_service.get_content_stats().await?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        quote_count: stats.quote_count,
        image_count: stats.image_count,
        reshuffle_count: stats.shuffle_count,
        session_timestamp: state.session_timestamp,
        timestamp: Utc::now().to_rfc3339(),
        version: crate::VERSION.to_string(),
    }))
}
