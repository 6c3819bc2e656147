//! Multi-column input table.
//!
//! A [`Table`] is the raw material an orchestration layer hands to an
//! indicator: named columns over one time axis. Columns are picked by
//! name; unknown names fall back to the conventional OHLC layout and then
//! to the first column.

use crate::error::{Error, Result};
use crate::index::TimeIndex;
use crate::line::Line;
use crate::traits::SeriesElement;

/// Conventional column positions for price data.
pub const OHLC_POSITIONS: [(&str, usize); 6] = [
    ("open", 0),
    ("high", 1),
    ("low", 2),
    ("close", 3),
    ("volume", 4),
    ("openinterest", 5),
];

/// Named columns sharing a [`TimeIndex`].
#[derive(Debug, Clone)]
pub struct Table<T> {
    names: Vec<String>,
    columns: Vec<Vec<T>>,
    index: TimeIndex,
}

impl<T: SeriesElement> Table<T> {
    /// Builds a table from `(name, values)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `Error::LengthMismatch` if any column differs in length from
    /// `index`.
    pub fn new<S: Into<String>>(index: TimeIndex, columns: Vec<(S, Vec<T>)>) -> Result<Self> {
        let mut names = Vec::with_capacity(columns.len());
        let mut data = Vec::with_capacity(columns.len());
        for (name, values) in columns {
            if values.len() != index.len() {
                return Err(Error::LengthMismatch {
                    expected: index.len(),
                    actual: values.len(),
                });
            }
            names.push(name.into());
            data.push(values);
        }
        Ok(Self {
            names,
            columns: data,
            index,
        })
    }

    /// Builds a table on a positional index sized from the first column.
    ///
    /// # Errors
    ///
    /// Returns `Error::LengthMismatch` if the columns differ in length.
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<T>)>) -> Result<Self> {
        let len = columns.first().map_or(0, |(_, values)| values.len());
        Self::new(TimeIndex::Positional(len), columns)
    }

    /// Column names in order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// The shared time axis.
    #[must_use]
    pub const fn index(&self) -> &TimeIndex {
        &self.index
    }

    /// Resolves a column selector to a position.
    ///
    /// Case-insensitive name match first, then [`OHLC_POSITIONS`], then 0.
    /// A fallback position beyond the table width also resolves to 0.
    ///
    /// # Example
    ///
    /// ```
    /// use ta_lines::table::Table;
    ///
    /// let table = Table::from_columns(vec![
    ///     ("Open", vec![1.0_f64]),
    ///     ("High", vec![2.0]),
    ///     ("Low", vec![0.5]),
    ///     ("Last", vec![1.5]),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(table.position("high"), 1);
    /// assert_eq!(table.position("close"), 3); // ohlc fallback
    /// assert_eq!(table.position("volume"), 0); // beyond width
    /// ```
    #[must_use]
    pub fn position(&self, selector: &str) -> usize {
        let wanted = selector.to_lowercase();
        if let Some(position) = self.names.iter().position(|name| name.to_lowercase() == wanted) {
            return position;
        }
        let fallback = OHLC_POSITIONS
            .iter()
            .find(|(name, _)| *name == wanted)
            .map_or(0, |&(_, position)| position);
        if fallback >= self.columns.len() {
            0
        } else {
            fallback
        }
    }

    /// Extracts the selected column as a raw line named after the selector.
    ///
    /// An empty table yields an empty line.
    #[must_use]
    pub fn line(&self, selector: &str) -> Line<T> {
        let position = self.position(selector);
        tracing::trace!(selector, position, "selected table column");
        // columns were checked against the index in `new`
        let line = match self.columns.get(position) {
            Some(values) => Line::with_index(values.clone(), self.index.clone())
                .unwrap_or_else(|_| Line::new(values.clone())),
            None => Line::new(Vec::new()),
        };
        line.with_name(selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::LineSource;

    fn ohlc() -> Table<f64> {
        Table::new(
            TimeIndex::timestamps(vec![100, 200, 300]),
            vec![
                ("Open", vec![1.0, 2.0, 3.0]),
                ("High", vec![1.5, 2.5, 3.5]),
                ("Low", vec![0.5, 1.5, 2.5]),
                ("Close", vec![1.2, 2.2, 3.2]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_select_by_name_case_insensitive() {
        let table = ohlc();
        let line = Line::wrap(LineSource::Table(&table, "close"), None).unwrap();
        assert_eq!(line.values(), &[1.2, 2.2, 3.2]);
        assert_eq!(line.minperiod(), 1);
        assert_eq!(line.name(), Some("close"));
        assert_eq!(line.index().label(2), Some(300));
    }

    #[test]
    fn test_unknown_selector_falls_back_to_first_column() {
        let table = ohlc();
        assert_eq!(table.position("adjclose"), 0);
        assert_eq!(table.position("openinterest"), 0);
    }

    #[test]
    fn test_ohlc_fallback_by_position() {
        let table = Table::from_columns(vec![
            ("a", vec![1.0_f64]),
            ("b", vec![2.0]),
            ("c", vec![3.0]),
        ])
        .unwrap();
        assert_eq!(table.position("low"), 2);
        assert_eq!(table.line("high").values(), &[2.0]);
    }

    #[test]
    fn test_ragged_columns_rejected() {
        let err = Table::from_columns(vec![("a", vec![1.0_f64, 2.0]), ("b", vec![1.0])]).unwrap_err();
        assert_eq!(
            err,
            Error::LengthMismatch {
                expected: 2,
                actual: 1
            }
        );
    }
}
