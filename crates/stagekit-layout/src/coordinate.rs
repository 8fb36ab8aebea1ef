//! Absolute-or-fractional coordinates and their resolution.
//!
//! A [`Coordinate`] is the single tagged form used for every position, size,
//! and alignment target: either a pixel value or a fraction of the containing
//! extent along the same axis. Resolution is pure and idempotent; it never
//! clamps, so fractions below 0 or above 1 place things outside the container.

use serde::{Deserialize, Serialize};
use stagekit_core::{LayoutError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Coordinate {
    /// Fixed pixel value.
    Absolute(i32),
    /// Fraction of the container extent, re-resolved on every resize.
    Fraction(f64),
}

impl Coordinate {
    /// Checked fractional coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidFraction`] for NaN or infinite values.
    pub fn fraction(value: f64) -> Result<Self> {
        if value.is_finite() {
            Ok(Self::Fraction(value))
        } else {
            Err(LayoutError::InvalidFraction { value })
        }
    }

    /// Pixel value against a container extent of `extent` pixels.
    ///
    /// Fractions round toward negative infinity.
    #[must_use]
    pub fn resolve(self, extent: i32) -> i32 {
        match self {
            Self::Absolute(px) => px,
            Self::Fraction(f) => (f * f64::from(extent)).floor() as i32,
        }
    }

    /// Whether this coordinate depends on the container extent.
    #[inline]
    #[must_use]
    pub const fn is_relative(self) -> bool {
        matches!(self, Self::Fraction(_))
    }

    /// Validate this coordinate as a size along a dimension.
    ///
    /// # Errors
    ///
    /// Negative pixel values and negative or non-finite fractions are
    /// rejected.
    pub fn as_size(self, dimension: &'static str) -> Result<Self> {
        match self {
            Self::Absolute(px) if px < 0 => Err(LayoutError::negative(dimension, px)),
            Self::Fraction(f) if !f.is_finite() => Err(LayoutError::InvalidFraction { value: f }),
            Self::Fraction(f) if f < 0.0 => Err(LayoutError::negative(dimension, f)),
            _ => Ok(self),
        }
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::Absolute(0)
    }
}

impl From<i32> for Coordinate {
    fn from(px: i32) -> Self {
        Self::Absolute(px)
    }
}
