// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rollout percentage newtype.

use crate::domain::{FeatureGateError, Result};
use std::fmt;

/// A rollout percentage in the range `0..=100`.
///
/// Used by the percentage-of-actors and percentage-of-time extension operations.
///
/// ```
/// use feature_gate::domain::Percentage;
///
/// assert_eq!(Percentage::new(25).unwrap().value(), 25);
/// assert!(Percentage::new(101).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percentage(u8);

impl Percentage {
    /// Validates and wraps a percentage.
    pub fn new(value: u32) -> Result<Self> {
        match u8::try_from(value) {
            Ok(v) if v <= 100 => Ok(Percentage(v)),
            _ => Err(FeatureGateError::InvalidPercentage { value }),
        }
    }

    /// Returns the wrapped value.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u32> for Percentage {
    type Error = FeatureGateError;

    fn try_from(value: u32) -> Result<Self> {
        Percentage::new(value)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
