// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Quote endpoint

use crate::common::{ApiResult, ApiState, Json, QuoteResponse, State};

/// Next quote in the current rotation
#[utoipa::path(
    get,
    path = "/quote",
    responses(
        (status = 200, description = "Next quote in rotation", body = QuoteResponse),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "content"
)]
pub async fn get_quote(State(state): State<ApiState>) -> ApiResult<Json<QuoteResponse>> {
    let message = state.content_service.next_quote().await?;
    Ok(Json(QuoteResponse::new(message)))
}
