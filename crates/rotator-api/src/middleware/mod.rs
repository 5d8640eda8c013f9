// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

pub mod cors;

pub use cors::create_cors_layer;
