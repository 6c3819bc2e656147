//! Comparison and inspection helpers.
//!
//! Floating-point results are compared with a tolerance. Undefined samples
//! compare equal to each other so whole lines, warm-up included, can be
//! checked in one call.
//!
//! ```
//! use ta_lines::line::Line;
//! use ta_lines::utils::{lines_approx_eq, EPSILON};
//!
//! let a = Line::new(vec![1.0_f64, 2.0, 3.0]).ago(1).unwrap();
//! let b = Line::new(vec![1.0_f64, 2.0 + 1e-12, 3.0]).ago(1).unwrap();
//! assert!(lines_approx_eq(&a, &b, EPSILON));
//! ```

use crate::line::Line;
use crate::traits::SeriesElement;

/// Absolute tolerance for values produced by a handful of operations.
pub const EPSILON: f64 = 1e-10;

/// Absolute tolerance for long recursions such as smoothing chains.
pub const LOOSE_EPSILON: f64 = 1e-6;

/// Returns true if `a` and `b` differ by less than `tolerance`, or if both
/// are undefined.
#[inline]
#[must_use]
pub fn approx_eq<T: SeriesElement>(a: T, b: T, tolerance: T) -> bool {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => true,
        (false, false) => (a - b).abs() < tolerance,
        _ => false,
    }
}

/// Relative variant of [`approx_eq`] for values of large magnitude.
///
/// ```
/// use ta_lines::utils::approx_eq_relative;
///
/// assert!(approx_eq_relative(1e10_f64, 1e10 + 1.0, 1e-9));
/// assert!(!approx_eq_relative(0.0_f64, 1e-11, 1e-10));
/// ```
#[inline]
#[must_use]
pub fn approx_eq_relative<T: SeriesElement>(a: T, b: T, tolerance: T) -> bool {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => true,
        (false, false) => {
            let scale = a.abs().max(b.abs());
            if scale == T::zero() {
                true
            } else {
                (a - b).abs() / scale < tolerance
            }
        }
        _ => false,
    }
}

/// Returns true if both lines claim the same minperiod and every sample
/// matches within `tolerance`.
#[must_use]
pub fn lines_approx_eq<T: SeriesElement>(a: &Line<T>, b: &Line<T>, tolerance: T) -> bool {
    a.minperiod() == b.minperiod()
        && a.len() == b.len()
        && a.iter().zip(b.iter()).all(|(x, y)| approx_eq(x, y, tolerance))
}

/// Number of undefined samples anywhere in `data`.
#[inline]
#[must_use]
pub fn count_nans<T: SeriesElement>(data: &[T]) -> usize {
    data.iter().filter(|x| x.is_nan()).count()
}

/// Number of leading undefined samples.
#[inline]
#[must_use]
pub fn count_nan_prefix<T: SeriesElement>(data: &[T]) -> usize {
    data.iter().take_while(|x| x.is_nan()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq_handles_undefined() {
        assert!(approx_eq(1.0_f64, 1.0 + 1e-11, EPSILON));
        assert!(!approx_eq(1.0_f64, 1.1, EPSILON));
        assert!(approx_eq(f64::NAN, f64::NAN, EPSILON));
        assert!(!approx_eq(f64::NAN, 0.0, EPSILON));
        assert!(approx_eq(1.0_f32, 1.000_001, 1e-5));
    }

    #[test]
    fn test_approx_eq_relative() {
        assert!(approx_eq_relative(0.0_f64, 0.0, 1e-10));
        assert!(approx_eq_relative(-5e8_f64, -5e8 - 0.01, 1e-9));
        assert!(!approx_eq_relative(1.0_f64, 1.5, 1e-3));
    }

    #[test]
    fn test_lines_approx_eq_checks_minperiod() {
        let a = Line::new(vec![1.0_f64, 2.0, 3.0]);
        let mut b = a.clone();
        assert!(lines_approx_eq(&a, &b, EPSILON));
        b.inc_minperiod(1);
        assert!(!lines_approx_eq(&a, &b, EPSILON));
    }

    #[test]
    fn test_nan_counts() {
        let data = [f64::NAN, f64::NAN, 1.0, f64::NAN];
        assert_eq!(count_nans(&data), 3);
        assert_eq!(count_nan_prefix(&data), 2);
        assert_eq!(count_nan_prefix(&[1.0_f64]), 0);
    }
}
