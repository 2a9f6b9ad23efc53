// SPDX-License-Identifier: MIT OR Apache-2.0

//! Optional adapter surface.
//!
//! Expression rules, actor and group targeting, percentage rollout, preloading,
//! import/export, memoization and sync are declared here for future backends.
//! Every method has a default body returning
//! [`UnsupportedOperation`](crate::domain::FeatureGateError::UnsupportedOperation),
//! so an adapter only overrides what it actually provides and advertises it via
//! [`Capabilities`].

use crate::domain::{FeatureGateError, Percentage, Result};

/// Flags describing which optional operations an adapter provides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Expression-based rules
    pub expressions: bool,
    /// Per-actor overrides
    pub actors: bool,
    /// Per-group overrides
    pub groups: bool,
    /// Percentage-of-actors rollout
    pub percentage_of_actors: bool,
    /// Percentage-of-time rollout
    pub percentage_of_time: bool,
    /// Preloading feature state
    pub preload: bool,
    /// Import and export of feature state
    pub import_export: bool,
    /// Memoization toggles
    pub memoize: bool,
    /// Read-only introspection
    pub read_only: bool,
    /// Sync with an upstream
    pub sync: bool,
}

impl Capabilities {
    /// No optional operation is supported.
    pub const NONE: Capabilities = Capabilities {
        expressions: false,
        actors: false,
        groups: false,
        percentage_of_actors: false,
        percentage_of_time: false,
        preload: false,
        import_export: false,
        memoize: false,
        read_only: false,
        sync: false,
    };
}

/// The state of a single feature as seen by `preload`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreloadedFeature {
    /// The feature key
    pub key: String,
    /// Whether it is enabled
    pub enabled: bool,
}

/// The optional operation surface of an adapter.
pub trait AdapterExtensions: Send + Sync {
    /// Enables an expression rule for a feature.
    fn enable_expression(&self, _key: &str, _expression: &str) -> Result<bool> {
        Err(FeatureGateError::unsupported("enable_expression"))
    }

    /// Disables the expression rule of a feature.
    fn disable_expression(&self, _key: &str) -> Result<bool> {
        Err(FeatureGateError::unsupported("disable_expression"))
    }

    /// Returns the expression rule of a feature.
    fn expression(&self, _key: &str) -> Result<Option<String>> {
        Err(FeatureGateError::unsupported("expression"))
    }

    /// Adds a clause to the expression rule of a feature.
    fn add_expression(&self, _key: &str, _expression: &str) -> Result<bool> {
        Err(FeatureGateError::unsupported("add_expression"))
    }

    /// Removes a clause from the expression rule of a feature.
    fn remove_expression(&self, _key: &str, _expression: &str) -> Result<bool> {
        Err(FeatureGateError::unsupported("remove_expression"))
    }

    /// Enables a feature for one actor.
    fn enable_actor(&self, _key: &str, _actor: &str) -> Result<bool> {
        Err(FeatureGateError::unsupported("enable_actor"))
    }

    /// Disables a feature for one actor.
    fn disable_actor(&self, _key: &str, _actor: &str) -> Result<bool> {
        Err(FeatureGateError::unsupported("disable_actor"))
    }

    /// Enables a feature for a group.
    fn enable_group(&self, _key: &str, _group: &str) -> Result<bool> {
        Err(FeatureGateError::unsupported("enable_group"))
    }

    /// Disables a feature for a group.
    fn disable_group(&self, _key: &str, _group: &str) -> Result<bool> {
        Err(FeatureGateError::unsupported("disable_group"))
    }

    /// Enables a feature for a percentage of actors.
    fn enable_percentage_of_actors(&self, _key: &str, _percentage: Percentage) -> Result<bool> {
        Err(FeatureGateError::unsupported("enable_percentage_of_actors"))
    }

    /// Disables percentage-of-actors rollout.
    fn disable_percentage_of_actors(&self, _key: &str) -> Result<bool> {
        Err(FeatureGateError::unsupported("disable_percentage_of_actors"))
    }

    /// Enables a feature for a percentage of time.
    fn enable_percentage_of_time(&self, _key: &str, _percentage: Percentage) -> Result<bool> {
        Err(FeatureGateError::unsupported("enable_percentage_of_time"))
    }

    /// Disables percentage-of-time rollout.
    fn disable_percentage_of_time(&self, _key: &str) -> Result<bool> {
        Err(FeatureGateError::unsupported("disable_percentage_of_time"))
    }

    /// Loads the state of the given features in one pass.
    fn preload(&self, _keys: &[&str]) -> Result<Vec<PreloadedFeature>> {
        Err(FeatureGateError::unsupported("preload"))
    }

    /// Loads the state of every feature in one pass.
    fn preload_all(&self) -> Result<Vec<PreloadedFeature>> {
        Err(FeatureGateError::unsupported("preload_all"))
    }

    /// Serializes the adapter's feature state.
    fn export(&self) -> Result<String> {
        Err(FeatureGateError::unsupported("export"))
    }

    /// Replaces the adapter's feature state with a previous export.
    fn import(&self, _contents: &str) -> Result<bool> {
        Err(FeatureGateError::unsupported("import"))
    }

    /// Turns memoization on or off.
    fn memoize(&self, _enabled: bool) -> Result<bool> {
        Err(FeatureGateError::unsupported("memoize"))
    }

    /// Returns whether memoization is on.
    fn is_memoizing(&self) -> Result<bool> {
        Err(FeatureGateError::unsupported("is_memoizing"))
    }

    /// Returns whether the adapter rejects writes.
    fn is_read_only(&self) -> Result<bool> {
        Err(FeatureGateError::unsupported("is_read_only"))
    }

    /// Synchronizes with an upstream.
    fn sync(&self) -> Result<bool> {
        Err(FeatureGateError::unsupported("sync"))
    }

    /// Returns the shared secret used by `sync`.
    fn sync_secret(&self) -> Result<String> {
        Err(FeatureGateError::unsupported("sync_secret"))
    }
}
