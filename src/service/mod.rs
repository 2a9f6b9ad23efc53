// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the client facade.
//!
//! This module contains the [`Client`] application code uses to manage and
//! query features, and the builder that selects its adapter.

pub mod client;

// Re-export commonly used types
pub use client::{Client, ClientBuilder};
