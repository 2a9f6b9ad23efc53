// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing feature storage implementations.
//!
//! This module contains concrete implementations of the [`FeatureAdapter`]
//! trait defined in the ports layer. Each adapter stores features in a specific
//! backend.
//!
//! [`FeatureAdapter`]: crate::ports::FeatureAdapter

pub mod memory;
pub mod posthog;
#[cfg(feature = "redis")]
pub mod redis;

pub use memory::{FeatureState, MemoryAdapter};
pub use posthog::{PosthogAdapter, PosthogApiClient, PosthogSettings};
#[cfg(feature = "redis")]
pub use redis::RedisAdapter;
