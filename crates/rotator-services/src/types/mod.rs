// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Transport-agnostic types for the service layer.
*/

pub mod dtos;
pub mod errors;

pub use dtos::*;
pub use errors::*;
