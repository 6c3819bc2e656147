//! The numeric sequence value.
//!
//! A [`Line`] is a time-indexed sequence of numbers that knows how many of
//! its leading samples are warm-up (`minperiod`). Positions before
//! `minperiod - 1` always hold `NaN`.
//!
//! # Example
//!
//! ```
//! use ta_lines::line::{Line, LineSource};
//!
//! let close = Line::new(vec![1.0_f64, 2.0, 3.0, 4.0]);
//! assert_eq!(close.minperiod(), 1);
//!
//! let sum = close.rolling(3).unwrap().sum().unwrap();
//! assert_eq!(sum.minperiod(), 3);
//! assert!(sum.values()[1].is_nan());
//! assert!((sum.values()[2] - 6.0).abs() < 1e-12);
//!
//! // wrapping keeps the warm-up
//! let wrapped = Line::wrap(LineSource::Line(&sum), Some("sum3")).unwrap();
//! assert_eq!(wrapped.minperiod(), 3);
//! ```

use crate::error::{Error, Result};
use crate::index::TimeIndex;
use crate::lines::Lines;
use crate::table::Table;
use crate::traits::SeriesElement;
use crate::utils::count_nan_prefix;

/// Everything a [`Line`] can be constructed from.
#[derive(Debug, Clone, Copy)]
pub enum LineSource<'a, T> {
    /// A raw sequence on a positional index.
    Raw(&'a [T]),
    /// A raw sequence on an explicit index.
    Indexed(&'a [T], &'a TimeIndex),
    /// An existing line; minperiod is inherited.
    Line(&'a Line<T>),
    /// The first member of a bundle; minperiod is inherited.
    Lines(&'a Lines<T>),
    /// One column of a table, chosen by name.
    Table(&'a Table<T>, &'a str),
}

/// A time-indexed numeric sequence with a warm-up count.
#[derive(Debug, Clone, PartialEq)]
pub struct Line<T> {
    values: Vec<T>,
    index: TimeIndex,
    minperiod: usize,
    name: Option<String>,
}

impl<T: SeriesElement> Line<T> {
    /// Wraps raw values on a positional index with `minperiod == 1`.
    #[must_use]
    pub fn new(values: Vec<T>) -> Self {
        let index = TimeIndex::Positional(values.len());
        Self {
            values,
            index,
            minperiod: 1,
            name: None,
        }
    }

    /// Wraps raw values on `index` with `minperiod == 1`.
    ///
    /// # Errors
    ///
    /// Returns `Error::LengthMismatch` if `values` and `index` differ in
    /// length.
    pub fn with_index(values: Vec<T>, index: TimeIndex) -> Result<Self> {
        if values.len() != index.len() {
            return Err(Error::LengthMismatch {
                expected: index.len(),
                actual: values.len(),
            });
        }
        Ok(Self {
            values,
            index,
            minperiod: 1,
            name: None,
        })
    }

    /// Builds a line from any supported source.
    ///
    /// Raw sources start with `minperiod == 1`; lines and bundles keep the
    /// minperiod they already have. A `Some` name replaces the source's
    /// name, `None` keeps it.
    ///
    /// # Errors
    ///
    /// - `Error::LengthMismatch` for an indexed source of the wrong length
    /// - `Error::LineIndexOutOfRange` for a bundle without members
    /// - `Error::UnassignedLine` for a bundle whose first member is unset
    pub fn wrap(source: LineSource<'_, T>, name: Option<&str>) -> Result<Self> {
        let mut line = match source {
            LineSource::Raw(values) => Self::new(values.to_vec()),
            LineSource::Indexed(values, index) => Self::with_index(values.to_vec(), index.clone())?,
            LineSource::Line(line) => line.clone(),
            LineSource::Lines(lines) => lines.get_at(0)?.clone(),
            LineSource::Table(table, column) => table.line(column),
        };
        if let Some(name) = name {
            line.name = Some(name.to_string());
        }
        Ok(line)
    }

    /// Creates a line on this line's index, enforcing the warm-up invariant.
    pub(crate) fn derive(&self, values: Vec<T>, minperiod: usize) -> Self {
        debug_assert_eq!(values.len(), self.values.len());
        let mut line = Self {
            values,
            index: self.index.clone(),
            minperiod: minperiod.max(1),
            name: None,
        };
        line.blank_warmup();
        line
    }

    /// Creates an all-undefined buffer the length of this line.
    pub(crate) fn undefined_buffer(&self) -> Vec<T> {
        vec![T::nan(); self.values.len()]
    }

    fn blank_warmup(&mut self) {
        let end = self.first_valid().min(self.values.len());
        for value in &mut self.values[..end] {
            *value = T::nan();
        }
    }

    /// All values, warm-up included.
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Values from the first valid position onward.
    #[must_use]
    pub fn valid(&self) -> &[T] {
        let start = self.first_valid().min(self.values.len());
        &self.values[start..]
    }

    /// Consumes the line and returns its values.
    #[must_use]
    pub fn into_values(self) -> Vec<T> {
        self.values
    }

    /// The time axis.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> &TimeIndex {
        &self.index
    }

    /// 1-based warm-up count.
    #[inline]
    #[must_use]
    pub const fn minperiod(&self) -> usize {
        self.minperiod
    }

    /// Position of the first valid value, `minperiod - 1`.
    #[inline]
    #[must_use]
    pub const fn first_valid(&self) -> usize {
        self.minperiod - 1
    }

    /// Display name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the line with a new display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }

    /// Number of samples.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the line has no samples.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `position`, `None` past the end.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<T> {
        self.values.get(position).copied()
    }

    /// Iterates over all values, warm-up included.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, T>> {
        self.values.iter().copied()
    }

    /// Number of leading undefined values actually present. Equal to
    /// `minperiod - 1` unless the input itself carried extra `NaN`s.
    #[must_use]
    pub fn leading_undefined(&self) -> usize {
        count_nan_prefix(&self.values)
    }

    /// Writes one value while an indicator assembles its output.
    ///
    /// # Errors
    ///
    /// Returns `Error::PositionOutOfRange` past the end of the line.
    pub fn set(&mut self, position: usize, value: T) -> Result<()> {
        let len = self.values.len();
        let slot = self
            .values
            .get_mut(position)
            .ok_or(Error::PositionOutOfRange { position, len })?;
        *slot = value;
        Ok(())
    }

    /// Raises minperiod by `p`, blanking the positions that become warm-up.
    ///
    /// For indicators whose output starts later than the propagated rule
    /// says.
    pub fn inc_minperiod(&mut self, p: usize) {
        self.minperiod += p;
        self.blank_warmup();
    }

    /// Lowers minperiod by `p`. The exposed positions stay undefined until
    /// assigned with [`Line::set`].
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if minperiod would drop below 1.
    pub fn dec_minperiod(&mut self, p: usize) -> Result<()> {
        if p >= self.minperiod {
            return Err(Error::InvalidParameter {
                name: "p",
                reason: format!("cannot lower minperiod {} by {p}", self.minperiod),
            });
        }
        self.minperiod -= p;
        Ok(())
    }

    /// Array position of the first valid sample shifted by `offset`.
    #[inline]
    #[must_use]
    pub const fn min_index(&self, offset: usize) -> usize {
        self.minperiod - 1 + offset
    }

    /// The value `n` samples in the past at every position.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPeriod` if `n == 0`.
    pub fn ago(&self, n: usize) -> Result<Self> {
        self.standard(crate::ops::StandardOp::Shift, Some(n))
    }
}

impl<'a, T: SeriesElement> IntoIterator for &'a Line<T> {
    type Item = T;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
