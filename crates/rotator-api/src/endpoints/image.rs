// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Image endpoint
//!
//! The file is opened here first so every failure becomes a JSON error:
//! a missing file is 404, anything else (permissions, symlink loops, a
//! directory in its place) is 500. Bytes are then streamed by
//! `tower_http::services::ServeFile`, which sets the content type from the
//! file extension.

use std::convert::Infallible;
use std::io::ErrorKind;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::warn;

use crate::common::{ApiError, ApiResult, ApiState, State};

/// Next image in the current rotation
#[utoipa::path(
    get,
    path = "/image",
    responses(
        (status = 200, description = "Raw image bytes; content type inferred from the file name"),
        (status = 404, description = "Image file no longer exists", body = ApiError),
        (status = 500, description = "Image file could not be read", body = ApiError)
    ),
    tag = "content"
)]
pub async fn get_image(State(state): State<ApiState>, request: Request) -> ApiResult<Response> {
    let image = state.content_service.next_image().await?;

    let file = match tokio::fs::File::open(&image.path).await {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(target: "rotator-api", "Image '{}' disappeared from {}", image.file_name, image.path.display());
            return Err(ApiError::not_found("image", image.file_name));
        }
        Err(e) => {
            return Err(ApiError::internal(format!(
                "failed to open image '{}': {}",
                image.file_name, e
            )));
        }
    };

    match file.metadata().await {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => {
            return Err(ApiError::internal(format!(
                "image '{}' is not a regular file",
                image.file_name
            )));
        }
        Err(e) => {
            return Err(ApiError::internal(format!(
                "failed to stat image '{}': {}",
                image.file_name, e
            )));
        }
    }
    drop(file);

    let served: Result<_, Infallible> = ServeFile::new(&image.path).oneshot(request).await;
    let response = match served {
        Ok(response) => response,
        Err(never) => match never {},
    };

    // ServeFile reports its own open failures as a bare 404; the file was
    // readable a moment ago, so this is a server-side fault
    if response.status() == StatusCode::NOT_FOUND {
        return Err(ApiError::internal(format!(
            "image '{}' became unreadable while serving",
            image.file_name
        )));
    }

    Ok(response.into_response())
}
