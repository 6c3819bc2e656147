//! ta-lines: warm-up aware time series algebra for technical indicators
//!
//! This crate provides the value layer that indicator formulas are written
//! on. A [`Line`] is a numeric time series that knows how many leading
//! samples are warm-up (its `minperiod`). Every operation computes the
//! minperiod of its result from the minperiods of its inputs, so a
//! composite indicator reports exactly when it starts producing values.
//!
//! # Features
//!
//! - **Minperiod propagation**: elementwise, passthrough, rolling and
//!   smoothing operations each follow a fixed warm-up rule
//! - **Seeded smoothing**: EMA-style recursions seeded from a raw window,
//!   with offsets and dynamic smoothing factors
//! - **Name dispatch**: every operation is reachable by name through an
//!   [`operations::OperationTable`]
//! - **Generics**: works with both `f32` and `f64`
//!
//! # Quick Start
//!
//! ```
//! use ta_lines::prelude::*;
//!
//! let close = Line::new(vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
//!
//! // simple moving average: minperiod 3
//! let sma = close.rolling(3).unwrap().mean().unwrap();
//! assert_eq!(sma.minperiod(), 3);
//!
//! // exponential average seeded with the mean of the first 3 samples
//! let ema = close.ewm(&Smoothing::span(3)).unwrap();
//! assert_eq!(ema.values()[2], 2.0);
//!
//! // elementwise difference takes the larger warm-up
//! let spread = close.sub(&sma).unwrap();
//! assert_eq!(spread.minperiod(), 3);
//! assert!(spread.values()[1].is_nan());
//! ```
//!
//! # Error Handling
//!
//! Every fallible operation returns [`Result<T>`]. Errors are grouped by
//! [`ErrorKind`]:
//!
//! ```
//! use ta_lines::prelude::*;
//!
//! let a = Line::new(vec![1.0_f64, 2.0, 3.0]);
//! let b = Line::new(vec![1.0_f64, 2.0]);
//! assert_eq!(a.add(&b).unwrap_err().kind(), ErrorKind::Alignment);
//! assert_eq!(a.rolling(0).unwrap_err().kind(), ErrorKind::Configuration);
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::nursery)]
#![warn(clippy::needless_collect)]
#![warn(clippy::or_fun_call)]
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::useless_conversion)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod index;
pub mod line;
pub mod lines;
pub mod minperiod;
pub mod operations;
pub mod ops;
pub mod prelude;
pub mod table;
pub mod traits;
pub mod utils;

pub use error::{Error, ErrorKind, Result};
pub use index::TimeIndex;
pub use line::{Line, LineSource};
pub use lines::Lines;
pub use table::Table;
