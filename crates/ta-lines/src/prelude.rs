//! Commonly used types and traits for convenient importing.
//!
//! ```
//! use ta_lines::prelude::*;
//!
//! let close = Line::new(vec![2.0_f64, 4.0, 6.0, 8.0]);
//! let momentum = close.call("diff", &Args::new().period(1)).unwrap();
//! assert_eq!(momentum.into_line().unwrap().valid(), &[2.0, 2.0, 2.0]);
//! ```

pub use crate::error::{Error, ErrorKind, Result};
pub use crate::index::TimeIndex;
pub use crate::line::{Line, LineSource};
pub use crate::lines::Lines;
pub use crate::minperiod::SeedPlan;
pub use crate::operations::{Args, Operation, OperationTable, Value};
pub use crate::ops::{BinaryOp, Decay, ReductionOp, Seed, Smoothing, StandardOp, WindowFn};
pub use crate::table::Table;
pub use crate::traits::SeriesElement;
