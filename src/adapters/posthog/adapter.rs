// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feature adapter backed by the Posthog API client.

use crate::adapters::posthog::client::PosthogApiClient;
use crate::adapters::posthog::settings::PosthogSettings;
use crate::domain::{Feature, FeatureGateError, FlagRecord, NormalizedResponse, Result};
use crate::ports::FeatureAdapter;

/// Feature adapter over [`PosthogApiClient`].
///
/// `add` only creates the flag when the key does not resolve yet, and `remove`
/// only issues the soft-delete when it does; both return `true` either way.
/// Error payloads from the remote service are raised as
/// [`RemoteError`](FeatureGateError::RemoteError).
///
/// # Examples
///
/// ```rust,no_run
/// use feature_gate::adapters::PosthogAdapter;
/// use feature_gate::domain::Feature;
/// use feature_gate::ports::FeatureAdapter;
///
/// # fn main() -> feature_gate::domain::Result<()> {
/// let adapter = PosthogAdapter::from_env()?;
/// adapter.add(&Feature::new("Funnel Test", "funnel_test", "Tests a conversion funnel"))?;
/// adapter.enable("funnel_test")?;
/// assert!(adapter.is_enabled("funnel_test")?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PosthogAdapter {
    client: PosthogApiClient,
}

impl PosthogAdapter {
    /// Wraps an existing client.
    pub fn new(client: PosthogApiClient) -> Self {
        Self { client }
    }

    /// Builds a client from settings.
    pub fn from_settings(settings: PosthogSettings) -> Result<Self> {
        Ok(Self::new(PosthogApiClient::new(settings)?))
    }

    /// Builds a client from the `POSTHOG_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_settings(PosthogSettings::from_env()?)
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &PosthogApiClient {
        &self.client
    }
}

/// Raises an error payload as `RemoteError`.
fn ensure_ok(response: NormalizedResponse) -> Result<NormalizedResponse> {
    match response {
        NormalizedResponse::Errors { errors } => {
            let status = errors.first().map(|e| e.status).unwrap_or_default();
            Err(FeatureGateError::RemoteError { status, errors })
        }
        ok => Ok(ok),
    }
}

impl FeatureAdapter for PosthogAdapter {
    fn name(&self) -> &str {
        "posthog"
    }

    fn add(&self, feature: &Feature) -> Result<bool> {
        if self.client.fetch_feature(feature.key())?.is_none() {
            ensure_ok(
                self.client
                    .create_feature(feature.key(), feature.description())?,
            )?;
        }
        Ok(true)
    }

    fn remove(&self, key: &str) -> Result<bool> {
        match self.client.delete_feature(key) {
            Ok(response) => ensure_ok(response).map(|_| true),
            Err(FeatureGateError::FeatureNotFound { .. }) => Ok(true),
            Err(e) => Err(e),
        }
    }

    fn features(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for page in self.client.pages() {
            let page = ensure_ok(page?)?;
            keys.extend(
                page.entries()
                    .iter()
                    .filter_map(FlagRecord::from_value)
                    .filter(|record| !record.deleted && !record.key.is_empty())
                    .map(|record| record.key),
            );
        }
        Ok(keys)
    }

    fn is_enabled(&self, key: &str) -> Result<bool> {
        self.client.is_enabled(key)
    }

    fn enable(&self, key: &str) -> Result<bool> {
        ensure_ok(self.client.enable_feature(key)?).map(|_| true)
    }

    fn disable(&self, key: &str) -> Result<bool> {
        ensure_ok(self.client.disable_feature(key)?).map(|_| true)
    }
}
