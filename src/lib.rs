// SPDX-License-Identifier: MIT OR Apache-2.0

//! A hexagonal architecture feature flag client.
//!
//! This crate lets applications register, toggle and query feature flags
//! through one small client, independent of where the flags are stored. The
//! main backend is the Posthog feature flag REST API; an in-memory store and a
//! Redis store are also provided.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types (`Feature`, `Percentage`, normalized responses, errors)
//! - **Ports**: Trait definitions (`FeatureAdapter`, `AdapterExtensions`, `HttpTransport`)
//! - **Adapters**: Storage backends (memory, Posthog, Redis)
//! - **Service**: The `Client` facade that forwards to one adapter
//!
//! # Feature Flags
//!
//! - `yaml`: Load Posthog settings from a YAML file (default)
//! - `logging`: JSON file logging helper for applications
//! - `cli`: The `feature-gate` command line tool (implies `logging`)
//! - `redis`: Redis storage adapter
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust
//! use feature_gate::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let client = Client::builder().with_memory().build()?;
//!
//! client.add(&Feature::new("Funnel Test", "funnel_test", "Tests a conversion funnel"))?;
//! assert!(!client.is_enabled("funnel_test")?);
//!
//! client.enable("funnel_test")?;
//! assert!(client.is_enabled("funnel_test")?);
//! # Ok(())
//! # }
//! ```
//!
//! Talking to Posthog only needs a key and a project:
//!
//! ```rust,no_run
//! use feature_gate::prelude::*;
//!
//! # fn main() -> Result<()> {
//! // Reads POSTHOG_API_KEY, POSTHOG_PROJECT_ID and friends.
//! let settings = PosthogSettings::from_env()?;
//! let client = Client::builder().with_posthog(settings)?.build()?;
//! for key in client.features()? {
//!     println!("{key}");
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
#[cfg(feature = "logging")]
pub mod logging;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{MemoryAdapter, PosthogAdapter, PosthogApiClient, PosthogSettings};
    pub use crate::domain::{Feature, FeatureGateError, NormalizedResponse, Percentage, Result};
    pub use crate::ports::{AdapterExtensions, Capabilities, FeatureAdapter};
    pub use crate::service::{Client, ClientBuilder};

    #[cfg(feature = "redis")]
    pub use crate::adapters::RedisAdapter;
}
