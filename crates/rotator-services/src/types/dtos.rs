// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Data transfer objects handed from the service layer to transport adapters.
*/

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Image selected by the rotation, resolved against the image directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFile {
    /// Bare file name as listed at startup
    pub file_name: String,
    /// `image_dir.join(file_name)`
    pub path: PathBuf,
}

/// Snapshot of the content held by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentStats {
    pub quote_count: usize,
    pub image_count: usize,
    pub image_dir: PathBuf,
    /// Shuffles applied so far, including the one at startup
    pub shuffle_count: u64,
}
