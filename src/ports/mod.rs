// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) that define the interfaces
//! of the feature gate: the adapter contract every backend implements, the
//! optional extension surface, and the HTTP transport used by the remote adapter.

pub mod adapter;
pub mod extensions;
pub mod transport;

// Re-export commonly used types
pub use adapter::FeatureAdapter;
pub use extensions::{AdapterExtensions, Capabilities, PreloadedFeature};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
