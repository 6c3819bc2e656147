//! Numeric element trait and shared parameter validation.
//!
//! [`SeriesElement`] abstracts over `f32` and `f64` so that every
//! [`Line`](crate::line::Line) operation is written once. `NaN` is the
//! undefined marker for warm-up positions, which is why the trait is built
//! on `num_traits::Float`.
//!
//! # Example
//!
//! ```
//! use ta_lines::traits::{validate_period, SeriesElement};
//!
//! fn window_mean<T: SeriesElement>(data: &[T], period: usize) -> ta_lines::Result<T> {
//!     validate_period(period)?;
//!     let sum = data.iter().take(period).fold(T::zero(), |acc, &x| acc + x);
//!     Ok(sum / T::from_usize(period)?)
//! }
//!
//! let mean = window_mean(&[1.0_f64, 2.0, 3.0], 3).unwrap();
//! assert!((mean - 2.0).abs() < 1e-12);
//! ```

use num_traits::{Float, NumCast};

use crate::error::{Error, Result};

/// A numeric type that can be stored in a [`Line`](crate::line::Line).
///
/// Blanket-implemented for every `Float + NumCast` type, in practice `f32`
/// and `f64`.
pub trait SeriesElement: Float + NumCast + Copy + Default + Send + Sync + std::fmt::Debug + 'static {
    /// Creates an element from a `usize`, typically a period.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented.
    #[inline]
    fn from_usize(value: usize) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "usize to series element",
        })
    }

    /// Creates an element from an `f64`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented.
    #[inline]
    fn from_f64(value: f64) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "f64 to series element",
        })
    }

    /// Maps a boolean onto `1.0` / `0.0`.
    #[inline]
    #[must_use]
    fn from_bool(value: bool) -> Self {
        if value {
            Self::one()
        } else {
            Self::zero()
        }
    }

    /// Truthiness used by logical operators: non-zero is true.
    #[inline]
    #[must_use]
    fn is_truthy(self) -> bool {
        self != Self::zero()
    }
}

impl<T: Float + NumCast + Copy + Default + Send + Sync + std::fmt::Debug + 'static> SeriesElement
    for T
{
}

/// Validates that a period is at least 1.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if the period is zero.
#[inline]
pub const fn validate_period(period: usize) -> Result<()> {
    if period == 0 {
        Err(Error::InvalidPeriod {
            period,
            reason: "period must be at least 1",
        })
    } else {
        Ok(())
    }
}

/// Validates that `len` samples are enough for `operation`.
///
/// # Errors
///
/// Returns `Error::InsufficientData` if `len < required`.
#[inline]
pub const fn validate_min_length(len: usize, required: usize, operation: &'static str) -> Result<()> {
    if len < required {
        Err(Error::InsufficientData {
            operation,
            required,
            actual: len,
        })
    } else {
        Ok(())
    }
}
