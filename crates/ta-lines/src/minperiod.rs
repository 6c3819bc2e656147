//! Warm-up arithmetic for every operation family.
//!
//! `minperiod` is 1-based: a line with `minperiod == m` holds undefined
//! values at positions `0..m - 1` and valid values from `m - 1` onward.
//! Everything here is pure integer arithmetic; the operators in
//! [`ops`](crate::ops) call these rules and then fill the values.
//!
//! | Operation | Result minperiod |
//! |---|---|
//! | elementwise `a op b` | `max(m_a, m_b)` |
//! | standard op with period `p` | `m + p - overlap` (overlap 0) |
//! | rolling window of `p` | `m + p - overlap` (overlap 1) |
//! | seeded smoothing | `seed_end`, see [`SeedPlan`] |
//! | bundle | max over members |

use crate::error::{Error, Result};
use crate::traits::validate_period;

/// Overlap used by rolling windows: the last sample of the input's warm-up
/// is also the first sample of the window.
pub const WINDOW_OVERLAP: usize = 1;

/// Minperiod of an elementwise operation. Scalars count as 1.
///
/// # Example
///
/// ```
/// assert_eq!(ta_lines::minperiod::elementwise(5, 3), 5);
/// ```
#[inline]
#[must_use]
pub const fn elementwise(a: usize, b: usize) -> usize {
    if a > b {
        a
    } else {
        b
    }
}

/// Minperiod of an operation over a window of `period` samples.
///
/// # Errors
///
/// Returns `Error::InvalidPeriod` if `period == 0` and
/// `Error::InvalidParameter` if the overlap would push the result below 1.
///
/// # Example
///
/// ```
/// use ta_lines::minperiod::{windowed, WINDOW_OVERLAP};
///
/// assert_eq!(windowed(1, 5, WINDOW_OVERLAP).unwrap(), 5);
/// assert_eq!(windowed(3, 2, 0).unwrap(), 5);
/// ```
pub fn windowed(input: usize, period: usize, overlap: usize) -> Result<usize> {
    validate_period(period)?;
    match (input + period).checked_sub(overlap) {
        Some(minperiod) if minperiod >= 1 => Ok(minperiod),
        _ => Err(Error::InvalidParameter {
            name: "overlap",
            reason: format!("overlap {overlap} exceeds warm-up span {}", input + period - 1),
        }),
    }
}

/// Checks that an overlap override does not exceed the family default.
///
/// A larger overlap would claim positions whose values are never computed.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` if `overlap > default`.
pub fn validate_overlap(overlap: usize, default: usize) -> Result<()> {
    if overlap > default {
        return Err(Error::InvalidParameter {
            name: "overlap",
            reason: format!("overlap {overlap} exceeds {default} for this operation"),
        });
    }
    Ok(())
}

/// Aggregated minperiod of a bundle: the largest member, 1 when empty.
#[must_use]
pub fn aggregate(minperiods: impl IntoIterator<Item = usize>) -> usize {
    minperiods.into_iter().fold(1, elementwise)
}

/// Where exponential smoothing plants its seed and where valid output
/// begins.
///
/// The raw input window `[seed_start, seed_end)` produces the seed, which
/// is written at `seed_end - 1`. The recursion runs from `seed_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPlan {
    /// Number of samples in the seed window.
    pub period: usize,
    /// Distance from the input's first valid sample to `seed_end`, before
    /// `early` is subtracted.
    pub offset: usize,
    /// First raw sample of the seed window.
    pub seed_start: usize,
    /// One past the last raw sample of the seed window.
    pub seed_end: usize,
    /// Minperiod of the smoothed result.
    pub minperiod: usize,
}

impl SeedPlan {
    /// Position of the seed in the output.
    #[inline]
    #[must_use]
    pub const fn seed_index(&self) -> usize {
        self.seed_end - 1
    }

    /// Computes the seed window.
    ///
    /// * `input` - minperiod of the raw input
    /// * `period` - seed window length
    /// * `poffset` - replaces `period` as the offset when non-zero
    /// * `early` - pulls the seed window back by a fixed count
    /// * `alpha` - minperiod of a dynamic smoothing factor, if any
    /// * `planted` - false when no seed value is written
    ///
    /// When a dynamic factor becomes valid later than the offset, the offset
    /// grows by `alpha - offset - 1`, so the seed lands one sample before
    /// the factor's first valid position.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidPeriod` if `period == 0`
    /// - `Error::InvalidParameter` if `early` reaches before the input
    /// - `Error::InsufficientData` if the seed window would start before
    ///   position 0
    ///
    /// # Example
    ///
    /// ```
    /// use ta_lines::minperiod::SeedPlan;
    ///
    /// let plan = SeedPlan::new(1, 3, 0, 0, None, true).unwrap();
    /// assert_eq!((plan.seed_start, plan.seed_end), (0, 3));
    /// assert_eq!(plan.seed_index(), 2);
    /// assert_eq!(plan.minperiod, 3);
    /// ```
    pub fn new(
        input: usize,
        period: usize,
        poffset: usize,
        early: usize,
        alpha: Option<usize>,
        planted: bool,
    ) -> Result<Self> {
        validate_period(period)?;

        let mut offset = if poffset > 0 { poffset } else { period };
        let alpha_minperiod = alpha.unwrap_or(1);
        if alpha_minperiod > offset {
            offset += alpha_minperiod - offset - 1;
        }

        let span = input.max(1) - 1 + offset;
        let seed_end = span.checked_sub(early).ok_or_else(|| Error::InvalidParameter {
            name: "early",
            reason: format!("early {early} exceeds seed offset {span}"),
        })?;
        let seed_start = seed_end
            .checked_sub(period)
            .ok_or(Error::InsufficientData {
                operation: "ewm seed",
                required: period,
                actual: seed_end,
            })?;

        let delivered = if planted { seed_end } else { seed_end + 1 };
        Ok(Self {
            period,
            offset,
            seed_start,
            seed_end,
            minperiod: elementwise(delivered, alpha_minperiod),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elementwise_takes_max() {
        assert_eq!(elementwise(1, 1), 1);
        assert_eq!(elementwise(5, 3), 5);
        assert_eq!(elementwise(3, 8), 8);
    }

    #[test]
    fn test_windowed_rules() {
        assert_eq!(windowed(1, 14, WINDOW_OVERLAP).unwrap(), 14);
        assert_eq!(windowed(5, 3, WINDOW_OVERLAP).unwrap(), 7);
        assert_eq!(windowed(5, 3, 0).unwrap(), 8);
        assert!(windowed(5, 0, 0).is_err());
        assert!(windowed(1, 1, 3).is_err());
    }

    #[test]
    fn test_validate_overlap() {
        assert!(validate_overlap(0, WINDOW_OVERLAP).is_ok());
        assert!(validate_overlap(1, WINDOW_OVERLAP).is_ok());
        assert!(matches!(
            validate_overlap(2, WINDOW_OVERLAP),
            Err(Error::InvalidParameter { name: "overlap", .. })
        ));
        assert!(validate_overlap(1, 0).is_err());
    }

    #[test]
    fn test_aggregate() {
        assert_eq!(aggregate([5, 3, 8]), 8);
        assert_eq!(aggregate(Vec::new()), 1);
    }

    #[test]
    fn test_seed_plan_plain() {
        let plan = SeedPlan::new(1, 30, 0, 0, None, true).unwrap();
        assert_eq!(plan.seed_start, 0);
        assert_eq!(plan.seed_end, 30);
        assert_eq!(plan.minperiod, 30);
    }

    #[test]
    fn test_seed_plan_follows_input_warmup() {
        // smoothing a line that becomes valid at index 25
        let plan = SeedPlan::new(26, 9, 0, 0, None, true).unwrap();
        assert_eq!(plan.seed_start, 25);
        assert_eq!(plan.seed_end, 34);
        assert_eq!(plan.minperiod, 34);
    }

    #[test]
    fn test_seed_plan_poffset() {
        // fast leg of a 12/26 macd delivered in step with the slow leg
        let plan = SeedPlan::new(1, 12, 26, 0, None, true).unwrap();
        assert_eq!(plan.seed_start, 14);
        assert_eq!(plan.seed_end, 26);
        assert_eq!(plan.minperiod, 26);
    }

    #[test]
    fn test_seed_plan_early() {
        let plan = SeedPlan::new(2, 14, 0, 1, None, true).unwrap();
        assert_eq!(plan.seed_start, 0);
        assert_eq!(plan.seed_end, 14);
        assert_eq!(plan.minperiod, 14);
    }

    #[test]
    fn test_seed_plan_dynamic_alpha_extension() {
        // alpha valid from 31 with offset 30: offset grows by 31 - 30 - 1 = 0
        let plan = SeedPlan::new(1, 30, 0, 0, Some(31), true).unwrap();
        assert_eq!(plan.offset, 30);
        assert_eq!(plan.seed_end, 30);
        assert_eq!(plan.minperiod, 31);

        // alpha valid from 11 with offset 3: offset becomes 10
        let plan = SeedPlan::new(1, 3, 0, 0, Some(11), true).unwrap();
        assert_eq!(plan.offset, 10);
        assert_eq!(plan.seed_end, 10);
        assert_eq!(plan.seed_start, 7);
        assert_eq!(plan.minperiod, 11);
    }

    #[test]
    fn test_seed_plan_unplanted_claims_one_more() {
        let plan = SeedPlan::new(1, 5, 0, 0, None, false).unwrap();
        assert_eq!(plan.seed_end, 5);
        assert_eq!(plan.minperiod, 6);
    }

    #[test]
    fn test_seed_plan_errors() {
        assert!(matches!(
            SeedPlan::new(1, 0, 0, 0, None, true),
            Err(Error::InvalidPeriod { .. })
        ));
        assert!(matches!(
            SeedPlan::new(1, 5, 0, 9, None, true),
            Err(Error::InvalidParameter { name: "early", .. })
        ));
        // poffset shorter than the window: seed would start before 0
        assert!(matches!(
            SeedPlan::new(1, 10, 4, 0, None, true),
            Err(Error::InsufficientData { .. })
        ));
    }
}
