//! # Rotator - shuffled round-robin content server
//!
//! Serves quotes (`GET /quote`) and image files (`GET /image`). Each content
//! type cycles through every item exactly once in a random order before
//! repeating, and the order is redrawn from the operating system's secure
//! random source on a fixed period (one hour by default).
//!
//! ## Quick Start
//!
//! ```text
//! IMAGE_DIR=./images PORT=14467 rotator
//! curl http://localhost:14467/quote
//! curl -o next.png http://localhost:14467/image
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use rotator::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config(None, None)?;
//! let service = Arc::new(ContentRotationService::load(
//!     config.content.quotes.clone(),
//!     &config.content.image_dir,
//! )?);
//!
//! let router = create_http_server(ApiState::new(service.clone()));
//! # let _ = router;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: rotator-config, rotator-observability      │
//! │  (TOML + env + CLI config, tracing setup)               │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Services: rotator-services                             │
//! │  (Fisher–Yates, rotation cursors, reshuffle scheduler)  │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Transport: rotator-api                                 │
//! │  (axum router, handlers, graceful shutdown)             │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

// Re-export foundation
pub use rotator_config as config;
pub use rotator_observability as observability;

// Re-export services and transport
pub use rotator_api as api;
pub use rotator_services as services;

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::api::{create_http_server, ApiState};
    pub use crate::config::{load_config, validate_config, RotatorConfig};
    pub use crate::services::{
        ContentRotationService, ContentService, ReshuffleScheduler, ServiceError, ServiceResult,
    };
}
