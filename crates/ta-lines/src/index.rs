//! Time axis shared between lines.
//!
//! A derived [`Line`](crate::line::Line) owns its values but only shares the
//! index of its operand: cloning a [`TimeIndex`] bumps a reference count.

use std::sync::Arc;

use crate::error::{Error, Result};

/// The time axis of a [`Line`](crate::line::Line).
#[derive(Debug, Clone)]
pub enum TimeIndex {
    /// Plain positions `0..len`.
    Positional(usize),
    /// Monotonic timestamps, one per sample.
    Timestamps(Arc<[i64]>),
}

impl TimeIndex {
    /// Creates a timestamp index.
    #[must_use]
    pub fn timestamps(labels: impl Into<Arc<[i64]>>) -> Self {
        Self::Timestamps(labels.into())
    }

    /// Number of samples on this axis.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Positional(len) => *len,
            Self::Timestamps(labels) => labels.len(),
        }
    }

    /// Returns true if the axis has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Label of the sample at `position`: the timestamp, or the position
    /// itself for positional indices.
    #[must_use]
    pub fn label(&self, position: usize) -> Option<i64> {
        match self {
            Self::Positional(len) => {
                if position < *len {
                    i64::try_from(position).ok()
                } else {
                    None
                }
            }
            Self::Timestamps(labels) => labels.get(position).copied(),
        }
    }

    /// Returns true if both axes have the same length and the same labels.
    #[must_use]
    pub fn is_aligned_with(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Positional(a), Self::Positional(b)) => a == b,
            (Self::Timestamps(a), Self::Timestamps(b)) => Arc::ptr_eq(a, b) || a == b,
            (Self::Positional(len), Self::Timestamps(labels))
            | (Self::Timestamps(labels), Self::Positional(len)) => {
                *len == labels.len()
                    && labels
                        .iter()
                        .enumerate()
                        .all(|(i, &label)| i64::try_from(i).map_or(false, |i| i == label))
            }
        }
    }

    /// Checks that `other` lies on this axis.
    ///
    /// # Errors
    ///
    /// Returns `Error::LengthMismatch` if the lengths differ and
    /// `Error::IndexMismatch` if the labels differ.
    pub fn ensure_aligned(&self, other: &Self) -> Result<()> {
        if self.len() != other.len() {
            return Err(Error::LengthMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }
        if !self.is_aligned_with(other) {
            return Err(Error::IndexMismatch { len: self.len() });
        }
        Ok(())
    }
}

impl PartialEq for TimeIndex {
    fn eq(&self, other: &Self) -> bool {
        self.is_aligned_with(other)
    }
}
