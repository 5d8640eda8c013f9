/*!
Content rotation service trait.

Defines the stable interface transport adapters use to pull rotating content.

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

use crate::types::*;
use async_trait::async_trait;

/// Rotating content service (transport-agnostic)
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Next quote in the current shuffled order
    ///
    /// Consecutive calls cycle through every quote exactly once before
    /// repeating, no matter how many callers run concurrently.
    async fn next_quote(&self) -> ServiceResult<String>;

    /// Next image in the current shuffled order, resolved against the image
    /// directory
    ///
    /// The file is not opened; it may have disappeared since startup.
    async fn next_image(&self) -> ServiceResult<ImageFile>;

    /// Reshuffle both sequences and reset their cursors
    ///
    /// # Errors
    /// * `ServiceError::RandomSource` - secure random source unavailable
    ///
    async fn reshuffle(&self) -> ServiceResult<()>;

    /// Content counts and shuffle bookkeeping; never advances a cursor
    async fn get_content_stats(&self) -> ServiceResult<ContentStats>;
}
