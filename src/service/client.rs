// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feature client facade.
//!
//! This module provides the [`Client`] that application code talks to. It owns
//! one adapter and forwards every call to it unchanged.

use crate::adapters::{MemoryAdapter, PosthogAdapter, PosthogSettings};
use crate::domain::{Feature, FeatureGateError, Result};
use crate::ports::{AdapterExtensions, Capabilities, FeatureAdapter};

/// Facade over a single [`FeatureAdapter`].
///
/// Results and errors from the adapter are returned as-is.
///
/// # Examples
///
/// ```rust
/// use feature_gate::prelude::*;
///
/// # fn main() -> Result<()> {
/// let client = Client::builder().with_memory().build()?;
///
/// client.add(&Feature::new("Search", "search", "New search page"))?;
/// client.enable("search")?;
/// assert!(client.is_enabled("search")?);
/// assert_eq!(client.features()?, vec!["search"]);
/// # Ok(())
/// # }
/// ```
pub struct Client {
    adapter: Box<dyn FeatureAdapter>,
}

impl Client {
    /// Creates a client that delegates to `adapter`.
    pub fn new(adapter: impl FeatureAdapter + 'static) -> Self {
        Self {
            adapter: Box::new(adapter),
        }
    }

    /// Creates a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Returns the wrapped adapter.
    pub fn adapter(&self) -> &dyn FeatureAdapter {
        self.adapter.as_ref()
    }

    /// Returns the optional operations of the adapter, if it has any.
    pub fn extensions(&self) -> Option<&dyn AdapterExtensions> {
        self.adapter.extensions()
    }

    /// Returns which optional operations the adapter provides.
    pub fn capabilities(&self) -> Capabilities {
        self.adapter.capabilities()
    }

    /// Registers a feature.
    pub fn add(&self, feature: &Feature) -> Result<bool> {
        self.adapter.add(feature)
    }

    /// Removes a feature.
    pub fn remove(&self, key: &str) -> Result<bool> {
        self.adapter.remove(key)
    }

    /// Lists registered feature keys.
    pub fn features(&self) -> Result<Vec<String>> {
        self.adapter.features()
    }

    /// Returns whether a feature is enabled.
    pub fn is_enabled(&self, key: &str) -> Result<bool> {
        self.adapter.is_enabled(key)
    }

    /// Enables a feature.
    pub fn enable(&self, key: &str) -> Result<bool> {
        self.adapter.enable(key)
    }

    /// Disables a feature.
    pub fn disable(&self, key: &str) -> Result<bool> {
        self.adapter.disable(key)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("adapter", &self.adapter.name())
            .finish()
    }
}

/// Builder for creating a [`Client`].
///
/// # Examples
///
/// ```rust,no_run
/// use feature_gate::adapters::PosthogSettings;
/// use feature_gate::service::ClientBuilder;
///
/// # fn main() -> feature_gate::domain::Result<()> {
/// let settings = PosthogSettings::builder()
///     .api_key("phx_secret")
///     .project_id("12345")
///     .build()?;
///
/// let client = ClientBuilder::new().with_posthog(settings)?.build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ClientBuilder {
    adapter: Option<Box<dyn FeatureAdapter>>,
}

impl ClientBuilder {
    /// Creates a builder with no adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses the given adapter. A later call replaces an earlier one.
    pub fn with_adapter(mut self, adapter: impl FeatureAdapter + 'static) -> Self {
        self.adapter = Some(Box::new(adapter));
        self
    }

    /// Uses an empty [`MemoryAdapter`].
    pub fn with_memory(self) -> Self {
        self.with_adapter(MemoryAdapter::new())
    }

    /// Uses a [`PosthogAdapter`] built from `settings`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_posthog(self, settings: PosthogSettings) -> Result<Self> {
        Ok(self.with_adapter(PosthogAdapter::from_settings(settings)?))
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if no adapter was configured.
    pub fn build(self) -> Result<Client> {
        let adapter = self
            .adapter
            .ok_or_else(|| FeatureGateError::config("No feature adapter configured"))?;
        Ok(Client { adapter })
    }
}
