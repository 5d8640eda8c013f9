// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# Rotator Service Layer

Transport-agnostic content rotation: every quote and every image is served
exactly once per cycle, in an order drawn from a cryptographically secure
random source, and the order is redrawn periodically.

## Architecture

```text
┌─────────────────────────────────────────────────────────────────┐
│                    TRANSPORT ADAPTERS                            │
│  Axum/REST (rotator-api)                                        │
└────────────────────────────┬────────────────────────────────────┘
                             ↓
┌─────────────────────────────────────────────────────────────────┐
│              SERVICE LAYER (This Crate)                          │
│  • ContentService      - next quote / next image / reshuffle    │
│  • ReshuffleScheduler  - periodic reshuffle task                │
└────────────────────────────┬────────────────────────────────────┘
                             ↓
┌─────────────────────────────────────────────────────────────────┐
│                   ROTATION PRIMITIVES                            │
│  Rotation (sequence + cursor under one lock), Fisher–Yates      │
└─────────────────────────────────────────────────────────────────┘
```

## Usage

```rust,ignore
use rotator_services::{ContentRotationService, ContentService, ReshuffleScheduler};
use std::sync::Arc;

let service = Arc::new(ContentRotationService::load(quotes, &image_dir)?);
let quote = service.next_quote().await?;

let scheduler = ReshuffleScheduler::new(service.clone(), period)?;
let handle = scheduler.spawn(cancel.clone());
```

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod content;
pub mod impls;
pub mod rotation;
pub mod scheduler;
pub mod shuffle;
pub mod traits;
pub mod types;

pub use content::load_image_files;
pub use impls::ContentRotationService;
pub use rotation::Rotation;
pub use scheduler::ReshuffleScheduler;
pub use traits::ContentService;
pub use types::*;
