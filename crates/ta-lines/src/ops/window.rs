//! Rolling window dispatch.
//!
//! A rolling window of `p` samples starts at the input's first valid
//! sample, so the result minperiod is `m + p - 1` (overlap 1). A window
//! that contains an undefined sample produces an undefined result.
//!
//! # Complexity
//!
//! - sum / mean: O(n) with a running sum
//! - max / min / argmax / argmin: O(n) with a monotonic deque
//! - std / var / median / custom closures: O(n * p)
//!
//! # Example
//!
//! ```
//! use ta_lines::line::Line;
//!
//! let data = Line::new(vec![3.0_f64, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0]);
//! let max = data.rolling(3).unwrap().max().unwrap();
//! assert_eq!(max.minperiod(), 3);
//! assert_eq!(max.valid(), &[4.0, 4.0, 5.0, 9.0, 9.0, 9.0]);
//! ```

use std::collections::VecDeque;

use crate::error::Result;
use crate::line::Line;
use crate::minperiod::{self, WINDOW_OVERLAP};
use crate::ops::ReductionOp;
use crate::traits::{validate_period, SeriesElement};

/// Functions a rolling window can be reduced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowFn {
    /// Window sum.
    Sum,
    /// Window mean.
    Mean,
    /// Window maximum.
    Max,
    /// Window minimum.
    Min,
    /// Window sample standard deviation.
    Std,
    /// Window sample variance.
    Var,
    /// Window median.
    Median,
    /// Offset of the first maximum inside the window.
    ArgMax,
    /// Offset of the first minimum inside the window.
    ArgMin,
}

impl WindowFn {
    /// Every window function, in catalogue order.
    pub const ALL: [Self; 9] = [
        Self::Sum,
        Self::Mean,
        Self::Max,
        Self::Min,
        Self::Std,
        Self::Var,
        Self::Median,
        Self::ArgMax,
        Self::ArgMin,
    ];

    /// Name under which the rolling form is installed.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sum => "rolling_sum",
            Self::Mean => "rolling_mean",
            Self::Max => "rolling_max",
            Self::Min => "rolling_min",
            Self::Std => "rolling_std",
            Self::Var => "rolling_var",
            Self::Median => "rolling_median",
            Self::ArgMax => "rolling_argmax",
            Self::ArgMin => "rolling_argmin",
        }
    }
}

/// A rolling window over a [`Line`], created by [`Line::rolling`].
#[derive(Debug, Clone, Copy)]
pub struct Rolling<'a, T> {
    line: &'a Line<T>,
    window: usize,
    overlap: usize,
}

impl<T: SeriesElement> Line<T> {
    /// Opens a rolling window of `window` samples.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPeriod` if `window == 0`.
    pub fn rolling(&self, window: usize) -> Result<Rolling<'_, T>> {
        validate_period(window)?;
        Ok(Rolling {
            line: self,
            window,
            overlap: WINDOW_OVERLAP,
        })
    }
}

impl<'a, T: SeriesElement> Rolling<'a, T> {
    /// Overrides the overlap discount (default 1).
    ///
    /// Only 0 and 1 are accepted: values are computed from the first full
    /// window, so a lower overlap only delays the claimed minperiod.
    #[must_use]
    pub const fn overlap(mut self, overlap: usize) -> Self {
        self.overlap = overlap;
        self
    }

    /// Window length.
    #[must_use]
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Minperiod every aggregation of this window produces.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if the overlap is above 1.
    pub fn minperiod(&self) -> Result<usize> {
        minperiod::validate_overlap(self.overlap, WINDOW_OVERLAP)?;
        minperiod::windowed(self.line.minperiod(), self.window, self.overlap)
    }

    /// Reduces every window with `f`.
    ///
    /// # Errors
    ///
    /// See [`Rolling::minperiod`]; `Error::NumericConversion` for counts
    /// that do not fit `T`.
    pub fn aggregate(&self, f: WindowFn) -> Result<Line<T>> {
        let minperiod = self.minperiod()?;
        tracing::trace!(
            function = f.name(),
            window = self.window,
            minperiod,
            "rolling dispatch"
        );
        let out = match f {
            WindowFn::Sum => self.running_sum(false)?,
            WindowFn::Mean => self.running_sum(true)?,
            WindowFn::Max => self.extremum(Extremum::Max, false)?,
            WindowFn::Min => self.extremum(Extremum::Min, false)?,
            WindowFn::ArgMax => self.extremum(Extremum::Max, true)?,
            WindowFn::ArgMin => self.extremum(Extremum::Min, true)?,
            WindowFn::Std => self.per_window(|w| ReductionOp::Std.apply(w))?,
            WindowFn::Var => self.per_window(|w| ReductionOp::Var.apply(w))?,
            WindowFn::Median => self.per_window(|w| ReductionOp::Median.apply(w))?,
        };
        Ok(self.line.derive(out, minperiod))
    }

    /// Reduces every complete window with a custom closure.
    ///
    /// Windows containing an undefined sample are not passed to `f`.
    ///
    /// # Errors
    ///
    /// See [`Rolling::minperiod`].
    pub fn apply(&self, mut f: impl FnMut(&[T]) -> T) -> Result<Line<T>> {
        let minperiod = self.minperiod()?;
        let out = self.per_window(|w| Ok(f(w)))?;
        Ok(self.line.derive(out, minperiod))
    }

    /// Rolling sum.
    ///
    /// # Errors
    ///
    /// See [`Rolling::aggregate`].
    pub fn sum(&self) -> Result<Line<T>> {
        self.aggregate(WindowFn::Sum)
    }

    /// Rolling mean.
    ///
    /// # Errors
    ///
    /// See [`Rolling::aggregate`].
    pub fn mean(&self) -> Result<Line<T>> {
        self.aggregate(WindowFn::Mean)
    }

    /// Rolling maximum.
    ///
    /// # Errors
    ///
    /// See [`Rolling::aggregate`].
    pub fn max(&self) -> Result<Line<T>> {
        self.aggregate(WindowFn::Max)
    }

    /// Rolling minimum.
    ///
    /// # Errors
    ///
    /// See [`Rolling::aggregate`].
    pub fn min(&self) -> Result<Line<T>> {
        self.aggregate(WindowFn::Min)
    }

    /// Rolling sample standard deviation.
    ///
    /// # Errors
    ///
    /// See [`Rolling::aggregate`].
    pub fn std(&self) -> Result<Line<T>> {
        self.aggregate(WindowFn::Std)
    }

    /// Position of the first complete window's last sample.
    fn first_output(&self) -> usize {
        self.line.first_valid() + self.window - 1
    }

    fn running_sum(&self, mean: bool) -> Result<Vec<T>> {
        let data = self.line.values();
        let start = self.line.first_valid();
        let window_t = T::from_usize(self.window)?;
        let mut out = self.line.undefined_buffer();

        let mut sum = T::zero();
        let mut undefined = 0usize;
        for position in start..data.len() {
            let value = data[position];
            if value.is_nan() {
                undefined += 1;
            } else {
                sum = sum + value;
            }
            if position >= start + self.window {
                let expired = data[position - self.window];
                if expired.is_nan() {
                    undefined -= 1;
                } else {
                    sum = sum - expired;
                }
            }
            if position >= self.first_output() && undefined == 0 {
                out[position] = if mean { sum / window_t } else { sum };
            }
        }
        Ok(out)
    }

    fn extremum(&self, kind: Extremum, offset: bool) -> Result<Vec<T>> {
        let data = self.line.values();
        let start = self.line.first_valid();
        let mut out = self.line.undefined_buffer();
        let mut deque = MonotonicDeque::new(self.window);

        let mut undefined = 0usize;
        for position in start..data.len() {
            if data[position].is_nan() {
                undefined += 1;
            }
            if position >= start + self.window && data[position - self.window].is_nan() {
                undefined -= 1;
            }
            deque.push(position, data, kind);
            if position < self.first_output() || undefined > 0 {
                continue;
            }
            if let Some(front) = deque.front_index() {
                out[position] = if offset {
                    T::from_usize(front + self.window - 1 - position)?
                } else {
                    data[front]
                };
            }
        }
        Ok(out)
    }

    fn per_window(&self, mut f: impl FnMut(&[T]) -> Result<T>) -> Result<Vec<T>> {
        let data = self.line.values();
        let mut out = self.line.undefined_buffer();
        for position in self.first_output()..data.len() {
            let window = &data[position + 1 - self.window..=position];
            if window.iter().any(|x| x.is_nan()) {
                continue;
            }
            out[position] = f(window)?;
        }
        Ok(out)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extremum {
    Max,
    Min,
}

/// Deque of indices whose values are monotonic (decreasing for max,
/// increasing for min), so the front is always the window's extremum. Ties
/// keep the earlier index.
#[derive(Debug, Clone)]
struct MonotonicDeque {
    deque: VecDeque<usize>,
    period: usize,
}

impl MonotonicDeque {
    fn new(period: usize) -> Self {
        Self {
            deque: VecDeque::with_capacity(period),
            period,
        }
    }

    fn push<T: SeriesElement>(&mut self, index: usize, data: &[T], kind: Extremum) {
        let value = data[index];
        if !value.is_nan() {
            while let Some(&back) = self.deque.back() {
                let back_val = data[back];
                let dominated = match kind {
                    Extremum::Max => back_val < value,
                    Extremum::Min => back_val > value,
                };
                if dominated {
                    self.deque.pop_back();
                } else {
                    break;
                }
            }
            self.deque.push_back(index);
        }
        self.remove_expired(index);
    }

    fn remove_expired(&mut self, current_index: usize) {
        if current_index + 1 >= self.period {
            let window_start = current_index + 1 - self.period;
            while let Some(&front) = self.deque.front() {
                if front < window_start {
                    self.deque.pop_front();
                } else {
                    break;
                }
            }
        }
    }

    fn front_index(&self) -> Option<usize> {
        self.deque.front().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::utils::{approx_eq, count_nan_prefix};

    const EPSILON: f64 = 1e-10;

    fn data() -> Line<f64> {
        Line::new(vec![3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0])
    }

    #[test]
    fn test_rolling_minperiod_rule() {
        let line = data();
        let shifted = line.shift(2).unwrap();
        let sum = shifted.rolling(4).unwrap().sum().unwrap();
        assert_eq!(sum.minperiod(), 3 + 4 - 1);
        assert_eq!(count_nan_prefix(sum.values()), 5);
    }

    #[test]
    fn test_rolling_sum_and_mean() {
        let line = data();
        let sum = line.rolling(3).unwrap().sum().unwrap();
        assert_eq!(sum.valid(), &[8.0, 6.0, 10.0, 15.0, 16.0, 17.0]);

        let mean = line.rolling(2).unwrap().mean().unwrap();
        assert_eq!(mean.valid(), &[2.0, 2.5, 2.5, 3.0, 7.0, 5.5, 4.0]);
    }

    #[test]
    fn test_rolling_extrema() {
        let line = data();
        let min = line.rolling(3).unwrap().min().unwrap();
        assert_eq!(min.valid(), &[1.0, 1.0, 1.0, 1.0, 2.0, 2.0]);

        let argmax = line.rolling(3).unwrap().aggregate(WindowFn::ArgMax).unwrap();
        // windows: [3,1,4] [1,4,1] [4,1,5] [1,5,9] [5,9,2] [9,2,6]
        assert_eq!(argmax.valid(), &[2.0, 1.0, 2.0, 2.0, 1.0, 0.0]);

        let argmin = line.rolling(3).unwrap().aggregate(WindowFn::ArgMin).unwrap();
        assert_eq!(argmin.valid(), &[1.0, 0.0, 1.0, 0.0, 2.0, 1.0]);
    }

    #[test]
    fn test_argmin_prefers_first_tie() {
        let line = Line::new(vec![1.0_f64, 1.0, 2.0]);
        let argmin = line.rolling(2).unwrap().aggregate(WindowFn::ArgMin).unwrap();
        assert_eq!(argmin.valid(), &[0.0, 0.0]);
    }

    #[test]
    fn test_rolling_std_and_median() {
        let line = Line::new(vec![2.0_f64, 4.0, 4.0, 4.0, 5.0]);
        let std = line.rolling(3).unwrap().std().unwrap();
        assert!(approx_eq(std.values()[2], (4.0_f64 / 3.0).sqrt(), EPSILON));
        assert!(approx_eq(std.values()[3], 0.0, EPSILON));

        let median = line.rolling(2).unwrap().aggregate(WindowFn::Median).unwrap();
        assert_eq!(median.valid(), &[3.0, 4.0, 4.0, 4.5]);
    }

    #[test]
    fn test_rolling_apply_closure() {
        let line = data();
        let range = line
            .rolling(3)
            .unwrap()
            .apply(|w| w.iter().copied().fold(f64::MIN, f64::max) - w.iter().copied().fold(f64::MAX, f64::min))
            .unwrap();
        assert_eq!(range.minperiod(), 3);
        assert_eq!(range.valid(), &[3.0, 3.0, 4.0, 8.0, 7.0, 7.0]);
    }

    #[test]
    fn test_gap_inside_window_is_undefined() {
        let line = Line::new(vec![1.0_f64, 2.0, f64::NAN, 4.0, 5.0, 6.0]);
        let sum = line.rolling(2).unwrap().sum().unwrap();
        assert_eq!(sum.values()[1], 3.0);
        assert!(sum.values()[2].is_nan());
        assert!(sum.values()[3].is_nan());
        assert_eq!(sum.values()[4], 9.0);

        let max = line.rolling(2).unwrap().max().unwrap();
        assert!(max.values()[3].is_nan());
        assert_eq!(max.values()[5], 6.0);
    }

    #[test]
    fn test_overlap_moves_claimed_minperiod() {
        let line = data();
        let sum = line.rolling(3).unwrap().overlap(0).sum().unwrap();
        assert_eq!(sum.minperiod(), 4);
        assert_eq!(sum.leading_undefined(), 3);
    }

    #[test]
    fn test_overlap_above_default_rejected() {
        let line = Line::new(vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let rolling = line.rolling(3).unwrap().overlap(2);
        assert!(matches!(
            rolling.sum(),
            Err(Error::InvalidParameter { name: "overlap", .. })
        ));
        assert!(rolling.apply(|w| w[0]).is_err());
    }

    #[test]
    fn test_window_longer_than_data() {
        let line = Line::new(vec![1.0_f64, 2.0]);
        let sum = line.rolling(5).unwrap().sum().unwrap();
        assert_eq!(sum.minperiod(), 5);
        assert!(sum.values().iter().all(|x| x.is_nan()));
    }

    #[test]
    fn test_zero_window_rejected() {
        assert!(data().rolling(0).is_err());
    }
}
