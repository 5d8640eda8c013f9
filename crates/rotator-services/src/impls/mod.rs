// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Service implementations.
*/

pub mod content_service_impl;

pub use content_service_impl::ContentRotationService;
