//! Reductions: collapse a line to a single statistic.
//!
//! Reductions read the valid region and skip undefined samples. They have
//! no warm-up of their own and return a plain scalar.

use crate::error::Result;
use crate::line::Line;
use crate::traits::SeriesElement;

/// Reduction catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReductionOp {
    /// Sum of defined samples; 0 when there are none.
    Sum,
    /// Arithmetic mean.
    Mean,
    /// Smallest sample.
    Min,
    /// Largest sample.
    Max,
    /// Sample standard deviation (n - 1 denominator).
    Std,
    /// Sample variance (n - 1 denominator).
    Var,
    /// Median.
    Median,
    /// Product of defined samples; 1 when there are none.
    Prod,
    /// Number of defined samples.
    Count,
}

impl ReductionOp {
    /// Every reduction, in catalogue order.
    pub const ALL: [Self; 9] = [
        Self::Sum,
        Self::Mean,
        Self::Min,
        Self::Max,
        Self::Std,
        Self::Var,
        Self::Median,
        Self::Prod,
        Self::Count,
    ];

    /// Name under which the reduction is installed.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Mean => "mean",
            Self::Min => "min",
            Self::Max => "max",
            Self::Std => "std",
            Self::Var => "var",
            Self::Median => "median",
            Self::Prod => "prod",
            Self::Count => "count",
        }
    }

    /// Reduces a slice, skipping `NaN` samples.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if a sample count cannot be
    /// represented as `T`.
    pub fn apply<T: SeriesElement>(self, data: &[T]) -> Result<T> {
        let defined = || data.iter().copied().filter(|x| !x.is_nan());
        let count = defined().count();

        let value = match self {
            Self::Sum => defined().fold(T::zero(), |acc, x| acc + x),
            Self::Prod => defined().fold(T::one(), |acc, x| acc * x),
            Self::Count => T::from_usize(count)?,
            Self::Min => defined().reduce(T::min).unwrap_or_else(T::nan),
            Self::Max => defined().reduce(T::max).unwrap_or_else(T::nan),
            Self::Mean => {
                if count == 0 {
                    T::nan()
                } else {
                    defined().fold(T::zero(), |acc, x| acc + x) / T::from_usize(count)?
                }
            }
            Self::Var | Self::Std => {
                if count < 2 {
                    T::nan()
                } else {
                    let mean = defined().fold(T::zero(), |acc, x| acc + x) / T::from_usize(count)?;
                    let m2 = defined().fold(T::zero(), |acc, x| acc + (x - mean) * (x - mean));
                    let var = m2 / T::from_usize(count - 1)?;
                    if self == Self::Std {
                        var.sqrt()
                    } else {
                        var
                    }
                }
            }
            Self::Median => {
                let mut sorted: Vec<T> = defined().collect();
                if sorted.is_empty() {
                    T::nan()
                } else {
                    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                    let mid = sorted.len() / 2;
                    if sorted.len() % 2 == 0 {
                        (sorted[mid - 1] + sorted[mid]) / (T::one() + T::one())
                    } else {
                        sorted[mid]
                    }
                }
            }
        };
        Ok(value)
    }
}

impl<T: SeriesElement> Line<T> {
    /// Collapses the valid region to a single statistic.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if a sample count cannot be
    /// represented as `T`.
    ///
    /// # Example
    ///
    /// ```
    /// use ta_lines::line::Line;
    /// use ta_lines::ops::ReductionOp;
    ///
    /// let line = Line::new(vec![1.0_f64, 2.0, 3.0, 4.0]).diff(1).unwrap();
    /// assert_eq!(line.reduce(ReductionOp::Sum).unwrap(), 3.0);
    /// assert_eq!(line.reduce(ReductionOp::Count).unwrap(), 3.0);
    /// ```
    pub fn reduce(&self, op: ReductionOp) -> Result<T> {
        op.apply(self.valid())
    }

    /// Mean of the valid region.
    ///
    /// # Errors
    ///
    /// See [`Line::reduce`].
    pub fn mean(&self) -> Result<T> {
        self.reduce(ReductionOp::Mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_basic_reductions() {
        let data = [2.0_f64, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(ReductionOp::Sum.apply(&data).unwrap(), 40.0);
        assert_eq!(ReductionOp::Mean.apply(&data).unwrap(), 5.0);
        assert_eq!(ReductionOp::Min.apply(&data).unwrap(), 2.0);
        assert_eq!(ReductionOp::Max.apply(&data).unwrap(), 9.0);
        assert_eq!(ReductionOp::Median.apply(&data).unwrap(), 4.5);
        assert_eq!(ReductionOp::Count.apply(&data).unwrap(), 8.0);
        assert!((ReductionOp::Var.apply(&data).unwrap() - 32.0 / 7.0).abs() < EPSILON);
        assert!((ReductionOp::Std.apply(&data).unwrap() - (32.0_f64 / 7.0).sqrt()).abs() < EPSILON);
    }

    #[test]
    fn test_reductions_skip_undefined() {
        let data = [f64::NAN, 1.0, f64::NAN, 3.0];
        assert_eq!(ReductionOp::Sum.apply(&data).unwrap(), 4.0);
        assert_eq!(ReductionOp::Mean.apply(&data).unwrap(), 2.0);
        assert_eq!(ReductionOp::Count.apply(&data).unwrap(), 2.0);
        assert_eq!(ReductionOp::Prod.apply(&data).unwrap(), 3.0);
    }

    #[test]
    fn test_empty_reductions() {
        let data: [f64; 0] = [];
        assert_eq!(ReductionOp::Sum.apply(&data).unwrap(), 0.0);
        assert_eq!(ReductionOp::Count.apply(&data).unwrap(), 0.0);
        assert!(ReductionOp::Mean.apply(&data).unwrap().is_nan());
        assert!(ReductionOp::Max.apply(&data).unwrap().is_nan());
        assert!(ReductionOp::Std.apply(&[1.0_f64]).unwrap().is_nan());
    }

    #[test]
    fn test_line_reduce_uses_valid_region() {
        let line = Line::new(vec![10.0_f64, 1.0, 2.0, 3.0]).shift(1).unwrap();
        // valid region is [10, 1, 2]
        assert_eq!(line.reduce(ReductionOp::Max).unwrap(), 10.0);
        assert_eq!(line.mean().unwrap(), 13.0 / 3.0);
    }
}
