// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process feature storage.
//!
//! This module provides an adapter that keeps feature state in memory. It is the
//! default backend for tests and for the command line tool when no remote
//! service is configured.

use crate::domain::{Feature, FeatureGateError, Result};
use crate::ports::{AdapterExtensions, Capabilities, FeatureAdapter, PreloadedFeature};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// The stored state of one feature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureState {
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Whether the feature is on
    #[serde(default)]
    pub enabled: bool,
}

impl From<&Feature> for FeatureState {
    fn from(feature: &Feature) -> Self {
        Self {
            name: feature.name().to_string(),
            description: feature.description().to_string(),
            enabled: false,
        }
    }
}

/// Feature adapter storing state in a map guarded by a `RwLock`.
///
/// Features are created disabled. `features()` lists keys in sorted order.
///
/// # Examples
///
/// ```rust
/// use feature_gate::adapters::MemoryAdapter;
/// use feature_gate::domain::Feature;
/// use feature_gate::ports::FeatureAdapter;
///
/// let adapter = MemoryAdapter::new();
/// adapter.add(&Feature::new("Search", "search", "New search page")).unwrap();
/// assert!(!adapter.is_enabled("search").unwrap());
///
/// adapter.enable("search").unwrap();
/// assert!(adapter.is_enabled("search").unwrap());
/// ```
#[derive(Debug, Default)]
pub struct MemoryAdapter {
    features: RwLock<BTreeMap<String, FeatureState>>,
}

impl MemoryAdapter {
    /// Creates an empty adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an adapter holding the given features, all disabled.
    pub fn with_features<'a>(features: impl IntoIterator<Item = &'a Feature>) -> Self {
        let map = features
            .into_iter()
            .map(|f| (f.key().to_string(), FeatureState::from(f)))
            .collect();
        Self {
            features: RwLock::new(map),
        }
    }

    /// Returns a copy of the stored state for `key`, if present.
    pub fn state(&self, key: &str) -> Result<Option<FeatureState>> {
        Ok(self.read()?.get(key).cloned())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, FeatureState>>> {
        self.features.read().map_err(|_| poisoned())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, FeatureState>>> {
        self.features.write().map_err(|_| poisoned())
    }

    fn set_enabled(&self, key: &str, enabled: bool) -> Result<bool> {
        let mut features = self.write()?;
        let state = features
            .get_mut(key)
            .ok_or_else(|| FeatureGateError::not_found(key))?;
        state.enabled = enabled;
        Ok(true)
    }
}

fn poisoned() -> FeatureGateError {
    FeatureGateError::AdapterError {
        adapter_name: "memory".to_string(),
        message: "Feature store lock poisoned".to_string(),
        source: None,
    }
}

impl FeatureAdapter for MemoryAdapter {
    fn name(&self) -> &str {
        "memory"
    }

    fn add(&self, feature: &Feature) -> Result<bool> {
        self.write()?
            .entry(feature.key().to_string())
            .or_insert_with(|| FeatureState::from(feature));
        Ok(true)
    }

    fn remove(&self, key: &str) -> Result<bool> {
        self.write()?.remove(key);
        Ok(true)
    }

    fn features(&self) -> Result<Vec<String>> {
        Ok(self.read()?.keys().cloned().collect())
    }

    fn is_enabled(&self, key: &str) -> Result<bool> {
        self.read()?
            .get(key)
            .map(|state| state.enabled)
            .ok_or_else(|| FeatureGateError::not_found(key))
    }

    fn enable(&self, key: &str) -> Result<bool> {
        self.set_enabled(key, true)
    }

    fn disable(&self, key: &str) -> Result<bool> {
        self.set_enabled(key, false)
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            preload: true,
            import_export: true,
            read_only: true,
            ..Capabilities::NONE
        }
    }

    fn extensions(&self) -> Option<&dyn AdapterExtensions> {
        Some(self)
    }
}

impl AdapterExtensions for MemoryAdapter {
    /// Keys that are not stored are skipped.
    fn preload(&self, keys: &[&str]) -> Result<Vec<PreloadedFeature>> {
        let features = self.read()?;
        Ok(keys
            .iter()
            .filter_map(|key| {
                features.get(*key).map(|state| PreloadedFeature {
                    key: key.to_string(),
                    enabled: state.enabled,
                })
            })
            .collect())
    }

    fn preload_all(&self) -> Result<Vec<PreloadedFeature>> {
        Ok(self
            .read()?
            .iter()
            .map(|(key, state)| PreloadedFeature {
                key: key.clone(),
                enabled: state.enabled,
            })
            .collect())
    }

    fn export(&self) -> Result<String> {
        serde_json::to_string(&*self.read()?).map_err(|e| FeatureGateError::AdapterError {
            adapter_name: "memory".to_string(),
            message: format!("Failed to export features: {}", e),
            source: Some(Box::new(e)),
        })
    }

    fn import(&self, contents: &str) -> Result<bool> {
        let imported: BTreeMap<String, FeatureState> =
            serde_json::from_str(contents).map_err(|e| FeatureGateError::DecodeError {
                message: format!("Invalid feature snapshot: {}", e),
                source: Some(Box::new(e)),
            })?;
        *self.write()? = imported;
        Ok(true)
    }

    fn is_read_only(&self) -> Result<bool> {
        Ok(false)
    }
}
