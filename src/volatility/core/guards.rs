//! Variance guards for GJR-GARCH models — bounds on the σ² recursion.
//!
//! Purpose
//! -------
//! Keep every conditional variance strictly positive and finite, whatever
//! finite parameter vector the optimizer probes. Infeasible probes (negative
//! ω, explosive persistence) are expected during a penalized search; the
//! guards make the likelihood well defined there so the penalty can steer the
//! search back.
//!
//! Invariants & assumptions
//! ------------------------
//! - `0 < min < max`, both finite.
//! - NaN inputs to [`VarianceGuards::clamp`] map to `max`, so a degenerate step
//!   can never poison the rest of the recursion.
use crate::volatility::errors::{GarchError, GarchResult};

/// Default lower bound on σ².
pub const DEFAULT_VARIANCE_MIN: f64 = 1e-12;

/// Default upper bound on σ².
pub const DEFAULT_VARIANCE_MAX: f64 = 1e12;

/// Lower/upper bounds for the conditional variance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarianceGuards {
    /// Lower bound for σ² (strictly > 0).
    pub min: f64,
    /// Upper bound for σ² (must be > `min`).
    pub max: f64,
}

impl VarianceGuards {
    /// Construct validated bounds from a `(min, max)` tuple.
    ///
    /// Errors
    /// ------
    /// - `GarchError::InvalidVarianceGuards` when either bound is non-finite,
    ///   `min <= 0`, or `min >= max`.
    pub fn new(value: (f64, f64)) -> GarchResult<Self> {
        let (min, max) = value;
        if !min.is_finite() || !max.is_finite() {
            return Err(GarchError::InvalidVarianceGuards {
                min,
                max,
                reason: "Guards must be finite.",
            });
        }
        if min <= 0.0 {
            return Err(GarchError::InvalidVarianceGuards {
                min,
                max,
                reason: "Lower guard must be strictly positive.",
            });
        }
        if min >= max {
            return Err(GarchError::InvalidVarianceGuards {
                min,
                max,
                reason: "Lower guard must be below the upper guard.",
            });
        }
        Ok(Self { min, max })
    }

    /// Clamp `value` into `[min, max]`; NaN maps to `max`.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() { self.max } else { value.clamp(self.min, self.max) }
    }

    /// `true` when `value` lies strictly inside the bounds, i.e. the clamp was inactive.
    #[inline]
    pub fn is_interior(&self, value: f64) -> bool {
        value > self.min && value < self.max
    }
}

impl Default for VarianceGuards {
    fn default() -> Self {
        Self { min: DEFAULT_VARIANCE_MIN, max: DEFAULT_VARIANCE_MAX }
    }
}
