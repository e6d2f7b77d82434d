//! Numeric range types
//!
//! Two-element (low, high) ranges used for intensity windows and colormaps.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated `(low, high)` range with `low < high`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange<T> {
    low: T,
    high: T,
}

impl<T> ValueRange<T>
where
    T: PartialOrd + Copy + fmt::Display,
{
    /// Create a new range; `name` is the flag it came from
    ///
    /// NaN bounds never compare less than anything and are rejected as well.
    pub fn new(name: &'static str, low: T, high: T) -> Result<Self, DomainError> {
        if !(low < high) {
            return Err(DomainError::InvalidRange {
                name,
                low: low.to_string(),
                high: high.to_string(),
            });
        }
        Ok(Self { low, high })
    }

    /// Build from the two values of a range flag
    pub fn from_values(name: &'static str, values: &[T]) -> Result<Self, DomainError> {
        match values {
            [low, high] => Self::new(name, *low, *high),
            _ => Err(DomainError::WrongArity {
                flag: name,
                expected: 2,
                found: values.len(),
            }),
        }
    }

    /// As a `(low, high)` pair
    pub fn as_tuple(&self) -> (T, T) {
        (self.low, self.high)
    }
}

impl<T: fmt::Display> fmt::Display for ValueRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.low, self.high)
    }
}

/// Intensity window for the slicer
pub type IntensityRange = ValueRange<i64>;

/// Range mapped onto a colormap
pub type ColormapRange = ValueRange<f64>;

impl Default for ColormapRange {
    fn default() -> Self {
        Self {
            low: 0.0,
            high: 1.0,
        }
    }
}
