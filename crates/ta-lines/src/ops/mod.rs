//! Operations on [`Line`](crate::line::Line) values, grouped by family.
//!
//! - [`binary`]: elementwise arithmetic, comparison and logic
//! - [`standard`]: passthrough transforms, optionally with a period
//! - [`reduction`]: whole-line statistics returning a scalar
//! - [`window`]: rolling window dispatch
//! - [`smoothing`]: seeded exponential smoothing
//!
//! Every operation computes its result minperiod with the rules in
//! [`minperiod`](crate::minperiod) and blanks the warm-up.

pub mod binary;
pub mod reduction;
pub mod smoothing;
pub mod standard;
pub mod window;

pub use binary::{BinaryOp, Operand};
pub use reduction::ReductionOp;
pub use smoothing::{Decay, Seed, Smoothing};
pub use standard::StandardOp;
pub use window::{Rolling, WindowFn};
