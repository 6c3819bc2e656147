//! Elementwise binary operations.
//!
//! The result minperiod is the larger of both operands' minperiods and only
//! positions from there onward are computed. Comparisons and logical
//! operators return `1.0` / `0.0`. An undefined operand always yields an
//! undefined result.

use crate::error::Result;
use crate::line::Line;
use crate::minperiod;
use crate::traits::SeriesElement;

/// Elementwise operator catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a * b`
    Mul,
    /// `a / b`
    Div,
    /// `floor(a / b)`
    FloorDiv,
    /// Remainder with the sign of the divisor.
    Mod,
    /// `a ^ b`
    Pow,
    /// `a < b`
    Lt,
    /// `a <= b`
    Le,
    /// `a > b`
    Gt,
    /// `a >= b`
    Ge,
    /// `a == b`
    Eq,
    /// `a != b`
    Ne,
    /// Both non-zero.
    And,
    /// Either non-zero.
    Or,
}

impl BinaryOp {
    /// Every binary operator, in catalogue order.
    pub const ALL: [Self; 15] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::FloorDiv,
        Self::Mod,
        Self::Pow,
        Self::Lt,
        Self::Le,
        Self::Gt,
        Self::Ge,
        Self::Eq,
        Self::Ne,
        Self::And,
        Self::Or,
    ];

    /// Name under which the operator is installed.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
            Self::FloorDiv => "floordiv",
            Self::Mod => "mod",
            Self::Pow => "pow",
            Self::Lt => "lt",
            Self::Le => "le",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::And => "and",
            Self::Or => "or",
        }
    }

    /// Applies the operator to two samples.
    #[inline]
    #[must_use]
    pub fn apply<T: SeriesElement>(self, a: T, b: T) -> T {
        if a.is_nan() || b.is_nan() {
            return T::nan();
        }
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
            Self::FloorDiv => (a / b).floor(),
            Self::Mod => a - b * (a / b).floor(),
            Self::Pow => a.powf(b),
            Self::Lt => T::from_bool(a < b),
            Self::Le => T::from_bool(a <= b),
            Self::Gt => T::from_bool(a > b),
            Self::Ge => T::from_bool(a >= b),
            Self::Eq => T::from_bool(a == b),
            Self::Ne => T::from_bool(a != b),
            Self::And => T::from_bool(a.is_truthy() && b.is_truthy()),
            Self::Or => T::from_bool(a.is_truthy() || b.is_truthy()),
        }
    }
}

/// Right-hand side of a binary operation.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a, T> {
    /// Another line on the same time axis.
    Line(&'a Line<T>),
    /// A constant, valid everywhere.
    Scalar(T),
}

impl<'a, T: SeriesElement> Operand<'a, T> {
    /// Minperiod contributed by the operand; 1 for scalars.
    #[must_use]
    pub const fn minperiod(&self) -> usize {
        match self {
            Self::Line(line) => line.minperiod(),
            Self::Scalar(_) => 1,
        }
    }

    #[inline]
    fn at(&self, position: usize) -> T {
        match self {
            Self::Line(line) => line.values()[position],
            Self::Scalar(value) => *value,
        }
    }
}

impl<'a, T> From<&'a Line<T>> for Operand<'a, T> {
    fn from(line: &'a Line<T>) -> Self {
        Self::Line(line)
    }
}

impl<'a, T: SeriesElement> From<T> for Operand<'a, T> {
    fn from(value: T) -> Self {
        Self::Scalar(value)
    }
}

impl<T: SeriesElement> Line<T> {
    /// Applies `self op rhs` elementwise.
    ///
    /// # Errors
    ///
    /// Returns an alignment error if `rhs` is a line on a different time
    /// axis.
    ///
    /// # Example
    ///
    /// ```
    /// use ta_lines::line::Line;
    /// use ta_lines::ops::BinaryOp;
    ///
    /// let a = Line::new(vec![1.0_f64, 2.0, 3.0]);
    /// let b = a.ago(1).unwrap();
    /// let change = a.binary(BinaryOp::Sub, &b).unwrap();
    /// assert_eq!(change.minperiod(), 2);
    /// assert_eq!(change.valid(), &[1.0, 1.0]);
    /// ```
    pub fn binary<'a>(&self, op: BinaryOp, rhs: impl Into<Operand<'a, T>>) -> Result<Self>
    where
        T: 'a,
    {
        self.elementwise(op, rhs.into(), false)
    }

    /// Applies `lhs op self` elementwise, for non-commutative operators
    /// with a scalar on the left.
    ///
    /// # Errors
    ///
    /// Never fails for scalar operands; kept fallible for symmetry with
    /// [`Line::binary`].
    pub fn binary_reversed(&self, op: BinaryOp, lhs: T) -> Result<Self> {
        self.elementwise(op, Operand::Scalar(lhs), true)
    }

    fn elementwise(&self, op: BinaryOp, rhs: Operand<'_, T>, reversed: bool) -> Result<Self> {
        if let Operand::Line(other) = rhs {
            self.index().ensure_aligned(other.index())?;
        }

        let minperiod = minperiod::elementwise(self.minperiod(), rhs.minperiod());
        let mut out = self.undefined_buffer();
        for (position, slot) in out.iter_mut().enumerate().skip(minperiod - 1) {
            let (a, b) = (self.values()[position], rhs.at(position));
            *slot = if reversed { op.apply(b, a) } else { op.apply(a, b) };
        }
        Ok(self.derive(out, minperiod))
    }

    /// `self + rhs`
    ///
    /// # Errors
    ///
    /// See [`Line::binary`].
    #[allow(clippy::should_implement_trait)]
    pub fn add<'a>(&self, rhs: impl Into<Operand<'a, T>>) -> Result<Self>
    where
        T: 'a,
    {
        self.binary(BinaryOp::Add, rhs)
    }

    /// `self - rhs`
    ///
    /// # Errors
    ///
    /// See [`Line::binary`].
    #[allow(clippy::should_implement_trait)]
    pub fn sub<'a>(&self, rhs: impl Into<Operand<'a, T>>) -> Result<Self>
    where
        T: 'a,
    {
        self.binary(BinaryOp::Sub, rhs)
    }

    /// `self * rhs`
    ///
    /// # Errors
    ///
    /// See [`Line::binary`].
    #[allow(clippy::should_implement_trait)]
    pub fn mul<'a>(&self, rhs: impl Into<Operand<'a, T>>) -> Result<Self>
    where
        T: 'a,
    {
        self.binary(BinaryOp::Mul, rhs)
    }

    /// `self / rhs`
    ///
    /// # Errors
    ///
    /// See [`Line::binary`].
    #[allow(clippy::should_implement_trait)]
    pub fn div<'a>(&self, rhs: impl Into<Operand<'a, T>>) -> Result<Self>
    where
        T: 'a,
    {
        self.binary(BinaryOp::Div, rhs)
    }

    /// `self ^ rhs`
    ///
    /// # Errors
    ///
    /// See [`Line::binary`].
    pub fn pow<'a>(&self, rhs: impl Into<Operand<'a, T>>) -> Result<Self>
    where
        T: 'a,
    {
        self.binary(BinaryOp::Pow, rhs)
    }
}
