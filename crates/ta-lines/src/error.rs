//! Error types for ta-lines.
//!
//! Every failure is one variant of [`Error`]. Variants fall into three
//! categories, reported by [`Error::kind`]:
//!
//! - [`ErrorKind::Configuration`]: invalid periods, smoothing parameters
//!   or missing operation arguments
//! - [`ErrorKind::Alignment`]: operands on different time axes, short
//!   dynamic smoothing factors, out of range positional writes
//! - [`ErrorKind::Key`]: bundle members or operations that do not exist

use thiserror::Error;

/// Category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid parameters for the requested operation.
    Configuration,
    /// Operands whose time axes or lengths do not line up.
    Alignment,
    /// Lookup of a name or position that is not declared.
    Key,
}

/// The main error type for ta-lines operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The period parameter is zero or otherwise unusable.
    #[error("invalid period {period}: {reason}")]
    InvalidPeriod {
        /// The rejected period.
        period: usize,
        /// Why the period was rejected.
        reason: &'static str,
    },

    /// A non-period parameter is outside its valid range.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The series is too short to plant a seed or fill a window.
    #[error("insufficient data for {operation}: required {required} elements, got {actual}")]
    InsufficientData {
        /// The operation that ran out of data.
        operation: &'static str,
        /// Number of samples needed.
        required: usize,
        /// Number of samples available.
        actual: usize,
    },

    /// A dispatched operation was called without an argument it needs.
    #[error("operation `{operation}` requires argument `{argument}`")]
    MissingArgument {
        /// Operation name as installed in the dispatch table.
        operation: &'static str,
        /// Name of the missing argument.
        argument: &'static str,
    },

    /// A bundle was declared with the same member name twice.
    #[error("duplicate line name `{name}`")]
    DuplicateLine {
        /// The repeated name.
        name: String,
    },

    /// An operation name is already bound to a different operation.
    #[error("operation `{name}` is already installed with different behavior")]
    DuplicateOperation {
        /// The contested name.
        name: &'static str,
    },

    /// Failed to convert a numeric value to the series element type.
    #[error("numeric conversion failed: {context}")]
    NumericConversion {
        /// Description of the conversion that failed.
        context: &'static str,
    },

    /// Two operands (or a column and its table) differ in length.
    #[error("length mismatch: expected {expected} elements, got {actual}")]
    LengthMismatch {
        /// Length of the reference operand.
        expected: usize,
        /// Length of the offending operand.
        actual: usize,
    },

    /// Two operands have equal lengths but different time labels.
    #[error("time index mismatch between operands of length {len}")]
    IndexMismatch {
        /// Common length of both indices.
        len: usize,
    },

    /// A dynamic smoothing factor does not cover the input.
    #[error("dynamic alpha too short: required {required} elements, got {actual}")]
    DynamicAlphaTooShort {
        /// Input length.
        required: usize,
        /// Length of the alpha sequence.
        actual: usize,
    },

    /// A positional write landed outside the sequence.
    #[error("position {position} out of range for sequence of length {len}")]
    PositionOutOfRange {
        /// Requested position.
        position: usize,
        /// Sequence length.
        len: usize,
    },

    /// A bundle has no member with this name.
    #[error("unknown line `{name}`")]
    UnknownLine {
        /// Requested name.
        name: String,
    },

    /// A bundle member is declared but has not been assigned yet.
    #[error("line `{name}` has not been assigned")]
    UnassignedLine {
        /// Member name.
        name: String,
    },

    /// A bundle has fewer members than the requested position.
    #[error("line position {position} out of range for bundle of {len} lines")]
    LineIndexOutOfRange {
        /// Requested position.
        position: usize,
        /// Number of declared members.
        len: usize,
    },

    /// No operation with this name is installed.
    #[error("unknown operation `{name}`")]
    UnknownOperation {
        /// Requested name.
        name: String,
    },
}

impl Error {
    /// Returns the category this error belongs to.
    ///
    /// # Example
    ///
    /// ```
    /// use ta_lines::error::{Error, ErrorKind};
    ///
    /// let err = Error::IndexMismatch { len: 10 };
    /// assert_eq!(err.kind(), ErrorKind::Alignment);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPeriod { .. }
            | Self::InvalidParameter { .. }
            | Self::InsufficientData { .. }
            | Self::MissingArgument { .. }
            | Self::DuplicateLine { .. }
            | Self::DuplicateOperation { .. }
            | Self::NumericConversion { .. } => ErrorKind::Configuration,
            Self::LengthMismatch { .. }
            | Self::IndexMismatch { .. }
            | Self::DynamicAlphaTooShort { .. }
            | Self::PositionOutOfRange { .. } => ErrorKind::Alignment,
            Self::UnknownLine { .. }
            | Self::UnassignedLine { .. }
            | Self::LineIndexOutOfRange { .. }
            | Self::UnknownOperation { .. } => ErrorKind::Key,
        }
    }
}

/// Convenience type alias for Results using the ta-lines Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_message() {
        let err = Error::InsufficientData {
            operation: "ewm",
            required: 20,
            actual: 10,
        };
        assert_eq!(
            err.to_string(),
            "insufficient data for ewm: required 20 elements, got 10"
        );
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_invalid_period_message() {
        let err = Error::InvalidPeriod {
            period: 0,
            reason: "period must be at least 1",
        };
        assert_eq!(err.to_string(), "invalid period 0: period must be at least 1");
    }

    #[test]
    fn test_alignment_kinds() {
        for err in [
            Error::LengthMismatch {
                expected: 3,
                actual: 2,
            },
            Error::IndexMismatch { len: 3 },
            Error::DynamicAlphaTooShort {
                required: 5,
                actual: 4,
            },
            Error::PositionOutOfRange { position: 9, len: 3 },
        ] {
            assert_eq!(err.kind(), ErrorKind::Alignment, "{err}");
        }
    }

    #[test]
    fn test_key_kinds() {
        let err = Error::UnknownLine {
            name: "close".to_string(),
        };
        assert_eq!(err.to_string(), "unknown line `close`");
        assert_eq!(err.kind(), ErrorKind::Key);
        assert_eq!(
            Error::UnknownOperation {
                name: "frobnicate".to_string()
            }
            .kind(),
            ErrorKind::Key
        );
    }

    #[test]
    fn test_error_equality_and_clone() {
        let err = Error::DuplicateOperation { name: "add" };
        assert_eq!(err.clone(), err);
        assert_ne!(err, Error::DuplicateOperation { name: "sub" });
    }

    #[test]
    fn test_error_is_std_error() {
        fn accepts_std_error<E: std::error::Error>(_: E) {}
        accepts_std_error(Error::IndexMismatch { len: 1 });
    }
}
