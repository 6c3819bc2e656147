//! Exponential smoothing with a deterministic seed.
//!
//! A raw input window produces one seed value, then the recursion
//!
//! ```text
//! out[i] = beta * out[i-1] + alpha_i * raw[i]      beta = 1 - alpha_i
//! ```
//!
//! runs forward from the end of that window. `alpha_i` is either a constant
//! derived from the [`Decay`] specification or, for adaptive averages, the
//! value of another line at the same position. Where the seed lands is
//! worked out by [`SeedPlan`].
//!
//! # Decay specifications
//!
//! | Decay | period | alpha |
//! |---|---|---|
//! | `Span(p)` | `p` | `2 / (p + 1)` |
//! | `CenterOfMass(c)` | `c + 1` | `1 / (c + 1)` |
//! | `Wilder(p)` | `p` | `1 / p` |
//! | `HalfLife { h, span }` | `span` | `1 - exp(ln(0.5) / h)` |
//! | `Alpha { a, span }` | `span` | `a` |
//! | `Dynamic { line, span }` | `span` | `line[i]` |
//!
//! # Example
//!
//! ```
//! use ta_lines::line::Line;
//! use ta_lines::ops::{Seed, Smoothing};
//!
//! let close = Line::new((1..=6).map(f64::from).collect());
//! let ema = close.ewm(&Smoothing::span(3)).unwrap();
//! assert_eq!(ema.minperiod(), 3);
//! assert_eq!(ema.valid(), &[2.0, 3.0, 4.0, 5.0]);
//!
//! let last = close.ewm(&Smoothing::span(3).seed(Seed::Last)).unwrap();
//! assert_eq!(last.valid()[0], 3.0);
//! ```

use crate::error::{Error, Result};
use crate::line::Line;
use crate::minperiod::{self, SeedPlan, WINDOW_OVERLAP};
use crate::ops::ReductionOp;
use crate::traits::{validate_min_length, validate_period, SeriesElement};

/// How the seed value is derived from the seed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Seed {
    /// Mean of the window.
    #[default]
    Mean,
    /// Last raw value of the window.
    Last,
    /// Sum of the window.
    Sum,
    /// No seed; the recursion starts from the first raw value after the
    /// window. Delivers one sample later than the other modes.
    None,
}

/// Decay specification, convertible to a period and a smoothing factor.
#[derive(Debug, Clone, PartialEq)]
pub enum Decay<T> {
    /// `alpha = 2 / (span + 1)`.
    Span(usize),
    /// `alpha = 1 / (com + 1)`, period `com + 1`.
    CenterOfMass(usize),
    /// Wilder's smoothing, `alpha = 1 / period`.
    Wilder(usize),
    /// `alpha = 1 - exp(ln(0.5) / halflife)`.
    HalfLife {
        /// Samples for a weight to halve; must be positive.
        halflife: f64,
        /// Seed window length.
        span: usize,
    },
    /// An explicit factor in `(0, 1]`.
    Alpha {
        /// The smoothing factor.
        alpha: f64,
        /// Seed window length.
        span: usize,
    },
    /// A per-position factor read from another line.
    Dynamic {
        /// Factor at each position, on the input's time axis.
        alpha: Line<T>,
        /// Seed window length.
        span: usize,
    },
}

/// A resolved smoothing factor.
#[derive(Debug, Clone, Copy)]
enum Factor<'a, T> {
    Constant(T),
    Dynamic(&'a Line<T>),
}

impl<T: SeriesElement> Factor<'_, T> {
    #[inline]
    fn at(&self, position: usize) -> T {
        match self {
            Self::Constant(alpha) => *alpha,
            Self::Dynamic(line) => line.values()[position],
        }
    }

    fn minperiod(&self) -> Option<usize> {
        match self {
            Self::Constant(_) => None,
            Self::Dynamic(line) => Some(line.minperiod()),
        }
    }
}

impl<T: SeriesElement> Decay<T> {
    /// Seed window length.
    #[must_use]
    pub const fn period(&self) -> usize {
        match self {
            Self::Span(period) | Self::Wilder(period) => *period,
            Self::CenterOfMass(com) => *com + 1,
            Self::HalfLife { span, .. } | Self::Alpha { span, .. } | Self::Dynamic { span, .. } => *span,
        }
    }

    /// Constant smoothing factor, `None` for [`Decay::Dynamic`].
    ///
    /// # Errors
    ///
    /// - `Error::InvalidPeriod` for a zero span or Wilder period
    /// - `Error::InvalidParameter` for an alpha outside `(0, 1]` or a
    ///   non-positive halflife
    pub fn alpha(&self) -> Result<Option<T>> {
        Ok(match self.factor()? {
            Factor::Constant(alpha) => Some(alpha),
            Factor::Dynamic(_) => None,
        })
    }

    fn factor(&self) -> Result<Factor<'_, T>> {
        let alpha = match self {
            Self::Span(period) => {
                validate_period(*period)?;
                (T::one() + T::one()) / T::from_usize(period + 1)?
            }
            Self::Wilder(period) => {
                validate_period(*period)?;
                T::one() / T::from_usize(*period)?
            }
            Self::CenterOfMass(com) => T::one() / T::from_usize(com + 1)?,
            Self::HalfLife { halflife, .. } => {
                if halflife.is_nan() || *halflife <= 0.0 {
                    return Err(Error::InvalidParameter {
                        name: "halflife",
                        reason: format!("halflife must be positive, got {halflife}"),
                    });
                }
                T::from_f64(1.0 - (0.5_f64.ln() / halflife).exp())?
            }
            Self::Alpha { alpha, .. } => {
                if alpha.is_nan() || *alpha <= 0.0 || *alpha > 1.0 {
                    return Err(Error::InvalidParameter {
                        name: "alpha",
                        reason: format!("alpha must be in (0, 1], got {alpha}"),
                    });
                }
                T::from_f64(*alpha)?
            }
            Self::Dynamic { alpha, .. } => return Ok(Factor::Dynamic(alpha)),
        };
        Ok(Factor::Constant(alpha))
    }

    /// Resolves the factor against the input it will smooth.
    fn resolve(&self, input: &Line<T>) -> Result<Factor<'_, T>> {
        let factor = self.factor()?;
        if let Factor::Dynamic(alpha) = factor {
            if alpha.len() < input.len() {
                return Err(Error::DynamicAlphaTooShort {
                    required: input.len(),
                    actual: alpha.len(),
                });
            }
            input.index().ensure_aligned(alpha.index())?;
        }
        Ok(factor)
    }
}

/// Exponential smoothing configuration.
///
/// Defaults to a span of 30 with a mean seed, like the common EMA default.
///
/// # Example
///
/// ```
/// use ta_lines::ops::{Decay, Seed, Smoothing};
///
/// let smma = Smoothing::<f64>::wilder(14);
/// assert_eq!(smma.decay(), &Decay::Wilder(14));
/// assert_eq!(smma.get_seed(), Seed::Mean);
///
/// let fast = Smoothing::<f64>::span(12).poffset(26);
/// assert_eq!(fast.get_poffset(), 26);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Smoothing<T> {
    decay: Decay<T>,
    seed: Seed,
    early: usize,
    poffset: usize,
    beta: Option<f64>,
}

impl<T: SeriesElement> Default for Smoothing<T> {
    fn default() -> Self {
        Self::span(30)
    }
}

impl<T: SeriesElement> Smoothing<T> {
    /// Creates a configuration with the default span of 30.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Smoothing from any decay specification.
    #[must_use]
    pub const fn from_decay(decay: Decay<T>) -> Self {
        Self {
            decay,
            seed: Seed::Mean,
            early: 0,
            poffset: 0,
            beta: None,
        }
    }

    /// Standard EMA, `alpha = 2 / (period + 1)`.
    #[must_use]
    pub const fn span(period: usize) -> Self {
        Self::from_decay(Decay::Span(period))
    }

    /// Center-of-mass decay, period `com + 1`.
    #[must_use]
    pub const fn com(com: usize) -> Self {
        Self::from_decay(Decay::CenterOfMass(com))
    }

    /// Wilder's smoothing, `alpha = 1 / period`.
    #[must_use]
    pub const fn wilder(period: usize) -> Self {
        Self::from_decay(Decay::Wilder(period))
    }

    /// Explicit factor with a seed window of `span`.
    #[must_use]
    pub const fn alpha(alpha: f64, span: usize) -> Self {
        Self::from_decay(Decay::Alpha { alpha, span })
    }

    /// Half-life decay with a seed window of `span`.
    #[must_use]
    pub const fn halflife(halflife: f64, span: usize) -> Self {
        Self::from_decay(Decay::HalfLife { halflife, span })
    }

    /// Per-position factor read from `alpha`.
    #[must_use]
    pub const fn dynamic(alpha: Line<T>, span: usize) -> Self {
        Self::from_decay(Decay::Dynamic { alpha, span })
    }

    /// Sets the seed mode.
    ///
    /// Default: [`Seed::Mean`]
    #[must_use]
    pub fn seed(mut self, seed: Seed) -> Self {
        self.seed = seed;
        self
    }

    /// Pulls the seed window back by `early` samples.
    ///
    /// Default: 0
    #[must_use]
    pub fn early(mut self, early: usize) -> Self {
        self.early = early;
        self
    }

    /// Replaces the period as the seed offset when non-zero, so legs of
    /// different length deliver their first value together.
    ///
    /// Default: 0
    #[must_use]
    pub fn poffset(mut self, poffset: usize) -> Self {
        self.poffset = poffset;
        self
    }

    /// Fixes the weight of the previous value instead of `1 - alpha`.
    /// Must lie in `[0, 1]`.
    #[must_use]
    pub fn beta(mut self, beta: f64) -> Self {
        self.beta = Some(beta);
        self
    }

    /// Returns the decay specification.
    #[must_use]
    pub const fn decay(&self) -> &Decay<T> {
        &self.decay
    }

    /// Returns the seed mode.
    #[must_use]
    pub const fn get_seed(&self) -> Seed {
        self.seed
    }

    /// Returns the early pull-back.
    #[must_use]
    pub const fn get_early(&self) -> usize {
        self.early
    }

    /// Returns the seed offset override.
    #[must_use]
    pub const fn get_poffset(&self) -> usize {
        self.poffset
    }

    /// Returns the explicit beta, if any.
    #[must_use]
    pub const fn get_beta(&self) -> Option<f64> {
        self.beta
    }

    fn beta_t(&self) -> Result<Option<T>> {
        match self.beta {
            Some(beta) if !(0.0..=1.0).contains(&beta) => {
                Err(Error::InvalidParameter {
                    name: "beta",
                    reason: format!("beta must be in [0, 1], got {beta}"),
                })
            }
            beta => beta.map(T::from_f64).transpose(),
        }
    }

    /// Seed placement this configuration produces on an input with the
    /// given minperiod.
    ///
    /// # Errors
    ///
    /// See [`SeedPlan::new`].
    pub fn plan(&self, input_minperiod: usize) -> Result<SeedPlan> {
        let alpha = match &self.decay {
            Decay::Dynamic { alpha, .. } => Some(alpha.minperiod()),
            _ => None,
        };
        SeedPlan::new(
            input_minperiod,
            self.decay.period(),
            self.poffset,
            self.early,
            alpha,
            self.seed != Seed::None,
        )
    }
}

impl<T: SeriesElement> Line<T> {
    /// Seeded exponential smoothing.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidPeriod`, `Error::InvalidParameter` for a bad decay
    ///   or offsets, see [`SeedPlan::new`]
    /// - `Error::InsufficientData` if the seed window ends past the input
    /// - `Error::DynamicAlphaTooShort` or an alignment error for a dynamic
    ///   factor that does not match the input
    /// - `Error::InvalidParameter` for a `beta` outside `[0, 1]`
    pub fn ewm(&self, smoothing: &Smoothing<T>) -> Result<Self> {
        let factor = smoothing.decay.resolve(self)?;
        let plan = smoothing.plan(self.minperiod())?;
        validate_min_length(self.len(), plan.seed_end, "ewm")?;
        let beta = smoothing.beta_t()?;

        let raw = self.values();
        let window = &raw[plan.seed_start..plan.seed_end];
        let mut prev = match smoothing.seed {
            Seed::Mean => Some(ReductionOp::Mean.apply(window)?),
            Seed::Sum => Some(ReductionOp::Sum.apply(window)?),
            Seed::Last => Some(raw[plan.seed_index()]),
            Seed::None => None,
        };
        tracing::debug!(
            seed = ?smoothing.seed,
            seed_start = plan.seed_start,
            seed_end = plan.seed_end,
            offset = plan.offset,
            minperiod = plan.minperiod,
            "planted smoothing seed"
        );

        // the recursion waits for the first valid dynamic factor
        let start = plan.seed_end.max(factor.minperiod().unwrap_or(1) - 1);
        let mut out = self.undefined_buffer();
        if let Some(seed) = prev {
            out[plan.seed_index()] = seed;
        }
        for (position, &value) in raw.iter().enumerate().skip(start) {
            let next = match prev {
                Some(prev) => {
                    let alpha = factor.at(position);
                    beta.unwrap_or_else(|| T::one() - alpha) * prev + alpha * value
                }
                None => value,
            };
            out[position] = next;
            prev = Some(next);
        }
        Ok(self.derive(out, plan.minperiod))
    }

    /// Exponential average without a seed window.
    ///
    /// The recursion starts from the first valid sample (or the first valid
    /// dynamic factor, if later). Seed mode, `early` and `poffset` are
    /// ignored. The result claims `m + period - 1` like a rolling window.
    ///
    /// # Errors
    ///
    /// Same as [`Line::ewm`], except that short inputs are not an error.
    pub fn ewm_unseeded(&self, smoothing: &Smoothing<T>) -> Result<Self> {
        let factor = smoothing.decay.resolve(self)?;
        let beta = smoothing.beta_t()?;
        let alpha_minperiod = factor.minperiod().unwrap_or(1);
        let minperiod = minperiod::elementwise(
            minperiod::windowed(self.minperiod(), smoothing.decay.period(), WINDOW_OVERLAP)?,
            alpha_minperiod,
        );

        let start = self.first_valid().max(alpha_minperiod - 1);
        let mut out = self.undefined_buffer();
        let mut prev: Option<T> = None;
        for (position, &value) in self.values().iter().enumerate().skip(start) {
            let next = match prev {
                Some(prev) => {
                    let alpha = factor.at(position);
                    beta.unwrap_or_else(|| T::one() - alpha) * prev + alpha * value
                }
                None => value,
            };
            out[position] = next;
            prev = Some(next);
        }
        Ok(self.derive(out, minperiod))
    }
}
