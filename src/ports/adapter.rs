// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feature adapter trait definition.
//!
//! This module defines the `FeatureAdapter` trait, which is the primary port
//! (interface) every storage backend must implement. The `Client` facade and the
//! CLI only ever talk to this trait.

use crate::domain::{Feature, Result};
use crate::ports::extensions::{AdapterExtensions, Capabilities};

/// A trait for feature flag storage backends.
///
/// # Contract
///
/// - `add` creates the flag if absent and returns `true` whether or not it
///   already existed. No mutating call is issued when it already exists.
/// - `remove` deletes the flag and returns `true`; if the flag is already absent
///   no mutating call is issued and `true` is still returned.
/// - `features` lists every known key, in backend-defined order.
/// - `is_enabled`, `enable` and `disable` fail with
///   [`FeatureNotFound`](crate::domain::FeatureGateError::FeatureNotFound) when the
///   key does not resolve, and never mutate anything in that case.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. Operations take `&self`; backends that
/// keep in-process state use interior mutability.
///
/// # Examples
///
/// ```rust
/// use feature_gate::domain::{Feature, FeatureGateError, Result};
/// use feature_gate::ports::FeatureAdapter;
///
/// struct AlwaysOff;
///
/// impl FeatureAdapter for AlwaysOff {
///     fn name(&self) -> &str {
///         "always-off"
///     }
///
///     fn add(&self, _feature: &Feature) -> Result<bool> {
///         Ok(true)
///     }
///
///     fn remove(&self, _key: &str) -> Result<bool> {
///         Ok(true)
///     }
///
///     fn features(&self) -> Result<Vec<String>> {
///         Ok(vec![])
///     }
///
///     fn is_enabled(&self, key: &str) -> Result<bool> {
///         Err(FeatureGateError::not_found(key))
///     }
///
///     fn enable(&self, key: &str) -> Result<bool> {
///         Err(FeatureGateError::not_found(key))
///     }
///
///     fn disable(&self, key: &str) -> Result<bool> {
///         Err(FeatureGateError::not_found(key))
///     }
/// }
///
/// let adapter = AlwaysOff;
/// assert!(adapter.add(&Feature::new("A", "a", "")).unwrap());
/// assert!(adapter.is_enabled("a").unwrap_err().is_not_found());
/// ```
pub trait FeatureAdapter: Send + Sync {
    /// Returns the name of this adapter, used in logs and error messages.
    fn name(&self) -> &str;

    /// Creates the flag if it does not exist yet.
    fn add(&self, feature: &Feature) -> Result<bool>;

    /// Deletes (or soft-deletes) the flag if it exists.
    fn remove(&self, key: &str) -> Result<bool>;

    /// Returns all known flag keys.
    fn features(&self) -> Result<Vec<String>>;

    /// Returns whether the flag is enabled.
    fn is_enabled(&self, key: &str) -> Result<bool>;

    /// Turns the flag on.
    fn enable(&self, key: &str) -> Result<bool>;

    /// Turns the flag off.
    fn disable(&self, key: &str) -> Result<bool>;

    /// Reports which optional operations this adapter provides.
    fn capabilities(&self) -> Capabilities {
        Capabilities::NONE
    }

    /// Returns the optional operation surface, if this adapter exposes one.
    fn extensions(&self) -> Option<&dyn AdapterExtensions> {
        None
    }
}

impl<T: FeatureAdapter + ?Sized> FeatureAdapter for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn add(&self, feature: &Feature) -> Result<bool> {
        (**self).add(feature)
    }

    fn remove(&self, key: &str) -> Result<bool> {
        (**self).remove(key)
    }

    fn features(&self) -> Result<Vec<String>> {
        (**self).features()
    }

    fn is_enabled(&self, key: &str) -> Result<bool> {
        (**self).is_enabled(key)
    }

    fn enable(&self, key: &str) -> Result<bool> {
        (**self).enable(key)
    }

    fn disable(&self, key: &str) -> Result<bool> {
        (**self).disable(key)
    }

    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }

    fn extensions(&self) -> Option<&dyn AdapterExtensions> {
        (**self).extensions()
    }
}
