//! Name-based operation dispatch.
//!
//! Every operation the crate provides is installed under a name in an
//! [`OperationTable`]. The process-wide table is built once on first use
//! and never changes afterwards; callers that need aliases or a reduced
//! catalogue build their own with [`OperationTable::install`].
//!
//! # Example
//!
//! ```
//! use ta_lines::line::Line;
//! use ta_lines::operations::Args;
//!
//! let close = Line::new(vec![1.0_f64, 2.0, 3.0, 4.0, 5.0]);
//!
//! let sma = close.call("rolling_mean", &Args::new().period(3)).unwrap();
//! let sma = sma.into_line().unwrap();
//! assert_eq!(sma.minperiod(), 3);
//!
//! let total = close.call("sum", &Args::new()).unwrap();
//! assert_eq!(total.into_scalar(), Some(15.0));
//! ```

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::error::{Error, Result};
use crate::line::Line;
use crate::ops::{BinaryOp, Operand, ReductionOp, Smoothing, StandardOp, WindowFn};
use crate::traits::SeriesElement;

/// Operation families, each with its own minperiod rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Elementwise, `max(m_a, m_b)`.
    Binary,
    /// Passthrough, `m` or `m + p - overlap`.
    Standard,
    /// Collapses to a scalar.
    Reduction,
    /// Multi-step window, `m + p - 1` or the smoothing seed rule.
    Window,
}

/// Multi-step window operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowOp {
    /// Rolling window reduced with a [`WindowFn`].
    Rolling(WindowFn),
    /// Seeded exponential smoothing.
    Ewm,
    /// Exponential average without a seed window.
    EwmUnseeded,
}

impl WindowOp {
    /// Name under which the operation is installed.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rolling(f) => f.name(),
            Self::Ewm => "ewm",
            Self::EwmUnseeded => "ewma",
        }
    }
}

/// A typed operation from any family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// See [`BinaryOp`].
    Binary(BinaryOp),
    /// See [`StandardOp`].
    Standard(StandardOp),
    /// See [`ReductionOp`].
    Reduction(ReductionOp),
    /// See [`WindowOp`].
    Window(WindowOp),
}

impl Operation {
    /// Family the operation belongs to.
    #[must_use]
    pub const fn family(self) -> Family {
        match self {
            Self::Binary(_) => Family::Binary,
            Self::Standard(_) => Family::Standard,
            Self::Reduction(_) => Family::Reduction,
            Self::Window(_) => Family::Window,
        }
    }

    /// Canonical name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Binary(op) => op.name(),
            Self::Standard(op) => op.name(),
            Self::Reduction(op) => op.name(),
            Self::Window(op) => op.name(),
        }
    }

    /// Every operation the crate provides.
    pub fn catalogue() -> impl Iterator<Item = Self> {
        let binary = BinaryOp::ALL.into_iter().map(Self::Binary);
        let standard = StandardOp::ALL.into_iter().map(Self::Standard);
        let reduction = ReductionOp::ALL.into_iter().map(Self::Reduction);
        let rolling = WindowFn::ALL
            .into_iter()
            .map(|f| Self::Window(WindowOp::Rolling(f)));
        let smoothing = [WindowOp::Ewm, WindowOp::EwmUnseeded]
            .into_iter()
            .map(Self::Window);
        binary.chain(standard).chain(reduction).chain(rolling).chain(smoothing)
    }
}

static GLOBAL_TABLE: Lazy<Result<OperationTable>> = Lazy::new(OperationTable::with_catalogue);

/// Maps operation names to typed operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationTable {
    operations: BTreeMap<&'static str, Operation>,
}

impl OperationTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table holding the full catalogue under canonical names.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateOperation` if two catalogue entries share a
    /// name.
    pub fn with_catalogue() -> Result<Self> {
        let mut table = Self::new();
        for op in Operation::catalogue() {
            table.install(op.name(), op)?;
        }
        tracing::debug!(operations = table.len(), "built operation table");
        Ok(table)
    }

    /// The process-wide table, built on first use.
    ///
    /// # Errors
    ///
    /// Returns the error that prevented the table from being built.
    pub fn global() -> Result<&'static Self> {
        GLOBAL_TABLE.as_ref().map_err(Clone::clone)
    }

    /// Binds `name` to `op`.
    ///
    /// Re-installing the same operation under the same name is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateOperation` if `name` is bound to a different
    /// operation.
    pub fn install(&mut self, name: &'static str, op: Operation) -> Result<()> {
        match self.operations.get(name) {
            Some(existing) if *existing == op => Ok(()),
            Some(_) => Err(Error::DuplicateOperation { name }),
            None => {
                self.operations.insert(name, op);
                Ok(())
            }
        }
    }

    /// Looks up an operation by name.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownOperation` if nothing is installed under
    /// `name`.
    pub fn resolve(&self, name: &str) -> Result<Operation> {
        self.operations
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownOperation {
                name: name.to_string(),
            })
    }

    /// Returns true if `name` is installed.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Installed names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.operations.keys().copied()
    }

    /// Number of installed names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns true if nothing is installed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Arguments for a dispatched operation. Unused arguments are ignored.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a, T> {
    operand: Option<Operand<'a, T>>,
    period: Option<usize>,
    overlap: Option<usize>,
    smoothing: Option<&'a Smoothing<T>>,
}

impl<T> Default for Args<'_, T> {
    fn default() -> Self {
        Self {
            operand: None,
            period: None,
            overlap: None,
            smoothing: None,
        }
    }
}

impl<'a, T: SeriesElement> Args<'a, T> {
    /// Creates an empty argument set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Right-hand side for binary operations.
    #[must_use]
    pub fn operand(mut self, operand: impl Into<Operand<'a, T>>) -> Self {
        self.operand = Some(operand.into());
        self
    }

    /// Period for period-taking standard ops and rolling windows, or the
    /// span for smoothing when no configuration is given.
    #[must_use]
    pub const fn period(mut self, period: usize) -> Self {
        self.period = Some(period);
        self
    }

    /// Overrides the overlap discount of a standard or rolling operation.
    #[must_use]
    pub const fn overlap(mut self, overlap: usize) -> Self {
        self.overlap = Some(overlap);
        self
    }

    /// Smoothing configuration for `ewm` / `ewma`.
    #[must_use]
    pub const fn smoothing(mut self, smoothing: &'a Smoothing<T>) -> Self {
        self.smoothing = Some(smoothing);
        self
    }
}

/// Result of a dispatched operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<T> {
    /// A derived line.
    Line(Line<T>),
    /// A reduction result.
    Scalar(T),
}

impl<T> Value<T> {
    /// The line, if the operation produced one.
    #[must_use]
    pub fn into_line(self) -> Option<Line<T>> {
        match self {
            Self::Line(line) => Some(line),
            Self::Scalar(_) => None,
        }
    }

    /// The scalar, if the operation produced one.
    #[must_use]
    pub fn into_scalar(self) -> Option<T> {
        match self {
            Self::Line(_) => None,
            Self::Scalar(value) => Some(value),
        }
    }
}

impl<T: SeriesElement> Line<T> {
    /// Resolves `name` in the global table and dispatches it.
    ///
    /// # Errors
    ///
    /// - `Error::UnknownOperation` if `name` is not installed
    /// - `Error::MissingArgument` if a required argument is absent
    /// - any error of the operation itself
    pub fn call(&self, name: &str, args: &Args<'_, T>) -> Result<Value<T>> {
        let op = OperationTable::global()?.resolve(name)?;
        self.dispatch(op, args)
    }

    /// Runs a typed operation with dispatched arguments.
    ///
    /// # Errors
    ///
    /// See [`Line::call`].
    pub fn dispatch(&self, op: Operation, args: &Args<'_, T>) -> Result<Value<T>> {
        let missing = |argument| Error::MissingArgument {
            operation: op.name(),
            argument,
        };
        let line = match op {
            Operation::Binary(binary) => {
                let operand = args.operand.ok_or_else(|| missing("operand"))?;
                self.binary(binary, operand)?
            }
            Operation::Standard(standard) => {
                self.standard_with_overlap(standard, args.period, args.overlap)?
            }
            Operation::Reduction(reduction) => return Ok(Value::Scalar(self.reduce(reduction)?)),
            Operation::Window(WindowOp::Rolling(f)) => {
                let period = args.period.ok_or_else(|| missing("period"))?;
                let mut rolling = self.rolling(period)?;
                if let Some(overlap) = args.overlap {
                    rolling = rolling.overlap(overlap);
                }
                rolling.aggregate(f)?
            }
            Operation::Window(smoothing @ (WindowOp::Ewm | WindowOp::EwmUnseeded)) => {
                let fallback;
                let config = match (args.smoothing, args.period) {
                    (Some(config), _) => config,
                    (None, Some(period)) => {
                        fallback = Smoothing::span(period);
                        &fallback
                    }
                    (None, None) => return Err(missing("smoothing")),
                };
                if smoothing == WindowOp::Ewm {
                    self.ewm(config)?
                } else {
                    self.ewm_unseeded(config)?
                }
            }
        };
        Ok(Value::Line(line))
    }
}
