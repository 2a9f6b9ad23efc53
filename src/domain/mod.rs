// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types.
//!
//! This module contains the value types shared by every adapter: the `Feature`
//! description, the normalized remote response vocabulary and the error type.
//! It is independent of any backend.

pub mod errors;
pub mod feature;
pub mod percentage;
pub mod response;

// Re-export commonly used types
pub use errors::{FeatureGateError, Result};
pub use feature::Feature;
pub use percentage::Percentage;
pub use response::{ApiError, FlagRecord, NormalizedResponse, Pagination};
