// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Service trait definitions.
*/

pub mod content_service;

pub use content_service::ContentService;
