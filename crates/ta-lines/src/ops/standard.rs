//! Passthrough ("standard") operations.
//!
//! These run over the whole sequence; undefined samples simply stay
//! undefined. Operations that take a period argument add `period - overlap`
//! to the input's minperiod, everything else inherits it.

use crate::error::{Error, Result};
use crate::line::Line;
use crate::minperiod;
use crate::traits::SeriesElement;

/// Passthrough operator catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardOp {
    /// Absolute value.
    Abs,
    /// Negation.
    Neg,
    /// Square root.
    Sqrt,
    /// Natural logarithm.
    Ln,
    /// Exponential.
    Exp,
    /// Value `period` samples back.
    Shift,
    /// Difference to the value `period` samples back.
    Diff,
    /// Relative change to the value `period` samples back.
    PctChange,
    /// Running sum from the first valid sample.
    CumSum,
    /// Running product from the first valid sample.
    CumProd,
    /// Running maximum from the first valid sample.
    CumMax,
    /// Running minimum from the first valid sample.
    CumMin,
}

impl StandardOp {
    /// Every standard operator, in catalogue order.
    pub const ALL: [Self; 12] = [
        Self::Abs,
        Self::Neg,
        Self::Sqrt,
        Self::Ln,
        Self::Exp,
        Self::Shift,
        Self::Diff,
        Self::PctChange,
        Self::CumSum,
        Self::CumProd,
        Self::CumMax,
        Self::CumMin,
    ];

    /// Name under which the operator is installed.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Abs => "abs",
            Self::Neg => "neg",
            Self::Sqrt => "sqrt",
            Self::Ln => "ln",
            Self::Exp => "exp",
            Self::Shift => "shift",
            Self::Diff => "diff",
            Self::PctChange => "pct_change",
            Self::CumSum => "cumsum",
            Self::CumProd => "cumprod",
            Self::CumMax => "cummax",
            Self::CumMin => "cummin",
        }
    }

    /// Overlap discount for operators that take a period argument, `None`
    /// for the rest.
    #[must_use]
    pub const fn period_overlap(self) -> Option<usize> {
        match self {
            Self::Shift | Self::Diff | Self::PctChange => Some(0),
            _ => None,
        }
    }
}

impl<T: SeriesElement> Line<T> {
    /// Applies a passthrough operator.
    ///
    /// `period` is required by [`StandardOp::Shift`], [`StandardOp::Diff`]
    /// and [`StandardOp::PctChange`] and ignored by the others.
    ///
    /// # Errors
    ///
    /// - `Error::MissingArgument` if a period operator gets no period
    /// - `Error::InvalidPeriod` if the period is zero
    pub fn standard(&self, op: StandardOp, period: Option<usize>) -> Result<Self> {
        self.standard_with_overlap(op, period, None)
    }

    /// [`Line::standard`] with the period operators' overlap discount
    /// replaced by `overlap`, which may not exceed the default of 0.
    pub(crate) fn standard_with_overlap(
        &self,
        op: StandardOp,
        period: Option<usize>,
        overlap: Option<usize>,
    ) -> Result<Self> {
        let values = self.values();
        let Some(default_overlap) = op.period_overlap() else {
            let out = match op {
                StandardOp::CumSum => self.cumulative(|acc, x| acc + x),
                StandardOp::CumProd => self.cumulative(|acc, x| acc * x),
                StandardOp::CumMax => self.cumulative(T::max),
                StandardOp::CumMin => self.cumulative(T::min),
                _ => values.iter().map(|&x| unary(op, x)).collect(),
            };
            return Ok(self.derive(out, self.minperiod()));
        };

        let period = period.ok_or(Error::MissingArgument {
            operation: op.name(),
            argument: "period",
        })?;
        let overlap = overlap.unwrap_or(default_overlap);
        minperiod::validate_overlap(overlap, default_overlap)?;
        let minperiod = minperiod::windowed(self.minperiod(), period, overlap)?;

        let mut out = self.undefined_buffer();
        for position in period..values.len() {
            let (now, then) = (values[position], values[position - period]);
            out[position] = match op {
                StandardOp::Shift => then,
                StandardOp::Diff => now - then,
                _ => now / then - T::one(),
            };
        }
        Ok(self.derive(out, minperiod))
    }

    /// Running fold from the first valid sample; undefined samples are
    /// reported as undefined and skipped by the accumulator.
    fn cumulative(&self, fold: impl Fn(T, T) -> T) -> Vec<T> {
        let mut out = self.undefined_buffer();
        let mut acc: Option<T> = None;
        for (position, &x) in self.values().iter().enumerate().skip(self.first_valid()) {
            if x.is_nan() {
                continue;
            }
            let next = acc.map_or(x, |acc| fold(acc, x));
            acc = Some(next);
            out[position] = next;
        }
        out
    }

    /// Absolute value.
    ///
    /// # Errors
    ///
    /// Never fails; see [`Line::standard`].
    pub fn abs(&self) -> Result<Self> {
        self.standard(StandardOp::Abs, None)
    }

    /// Value `period` samples back.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPeriod` if `period == 0`.
    pub fn shift(&self, period: usize) -> Result<Self> {
        self.standard(StandardOp::Shift, Some(period))
    }

    /// Difference to the value `period` samples back.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPeriod` if `period == 0`.
    pub fn diff(&self, period: usize) -> Result<Self> {
        self.standard(StandardOp::Diff, Some(period))
    }

    /// Relative change to the value `period` samples back.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPeriod` if `period == 0`.
    pub fn pct_change(&self, period: usize) -> Result<Self> {
        self.standard(StandardOp::PctChange, Some(period))
    }

    /// Running sum.
    ///
    /// # Errors
    ///
    /// Never fails; see [`Line::standard`].
    pub fn cumsum(&self) -> Result<Self> {
        self.standard(StandardOp::CumSum, None)
    }
}

fn unary<T: SeriesElement>(op: StandardOp, x: T) -> T {
    match op {
        StandardOp::Abs => x.abs(),
        StandardOp::Neg => -x,
        StandardOp::Sqrt => x.sqrt(),
        StandardOp::Ln => x.ln(),
        StandardOp::Exp => x.exp(),
        _ => x,
    }
}
