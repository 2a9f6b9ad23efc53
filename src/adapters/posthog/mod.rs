// SPDX-License-Identifier: MIT OR Apache-2.0

//! Posthog feature flag adapter.
//!
//! This module provides the HTTP client for the Posthog feature flag API, the
//! settings it is built from, a blocking `reqwest` transport, and the
//! [`PosthogAdapter`] exposing the client through the generic adapter contract.

pub mod adapter;
pub mod client;
pub mod settings;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;

pub use adapter::PosthogAdapter;
pub use client::{ListingPages, PosthogApiClient, MAX_LISTING_PAGES};
pub use settings::{PosthogSettings, PosthogSettingsBuilder, DEFAULT_API_BASE};
pub use transport::ReqwestTransport;
