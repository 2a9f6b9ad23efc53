// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feature value object.
//!
//! A `Feature` describes a flag's identity and metadata. It is immutable after
//! construction and owned by whoever builds it; no adapter assigns or mutates it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An immutable description of a feature flag.
///
/// The `key` is the stable identifier used for every lookup. No validation is
/// performed: empty or duplicate keys are accepted here, and uniqueness is left
/// to the backend.
///
/// # Examples
///
/// ```
/// use feature_gate::domain::Feature;
///
/// let feature = Feature::new(
///     "Phone Sales",
///     "phone_sales",
///     "Enable phone sales funnel optimization",
/// );
///
/// assert_eq!(feature.name(), "Phone Sales");
/// assert_eq!(feature.key(), "phone_sales");
/// assert_eq!(feature.description(), "Enable phone sales funnel optimization");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Feature {
    name: String,
    key: String,
    description: String,
}

impl Feature {
    /// Creates a new feature from its display name, key and description.
    pub fn new(
        name: impl Into<String>,
        key: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            description: description.into(),
        }
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the stable key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the description shown to remote UIs.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.key)
    }
}
