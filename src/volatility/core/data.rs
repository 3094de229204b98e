//! Return-series container for GJR-GARCH models.
//!
//! Purpose
//! -------
//! Provide a small, validated container for a chronological log-return series
//! so every downstream component (recursion, likelihoods, fitter, forecasts)
//! can assume clean input without re-checking it.
//!
//! Invariants & assumptions
//! ------------------------
//! - At least [`MIN_OBSERVATIONS`] observations: the likelihood sums over
//!   `t = 1..n−1`, so a single return leaves nothing to fit.
//! - Every value is finite. Zeros and negative values are ordinary returns.
//! - Values are stored as given; no demeaning or rescaling happens here.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path, too-short series, and non-finite values.
use crate::volatility::errors::{GarchError, GarchResult};
use ndarray::{Array1, ArrayView1};

/// Smallest series length accepted by [`ReturnSeries::new`].
pub const MIN_OBSERVATIONS: usize = 2;

/// `ReturnSeries` — validated, immutable log-return series.
///
/// Fields
/// ------
/// - `data`: `Array1<f64>`
///   Returns in chronological order; finite, length ≥ [`MIN_OBSERVATIONS`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    /// Observed returns (finite, chronological).
    pub data: Array1<f64>,
}

impl ReturnSeries {
    /// Construct a validated series.
    ///
    /// Errors
    /// ------
    /// - `GarchError::SeriesTooShort` when `data.len() < 2`.
    /// - `GarchError::NonFiniteData` for the first NaN/±inf entry.
    pub fn new(data: Array1<f64>) -> GarchResult<Self> {
        if data.len() < MIN_OBSERVATIONS {
            return Err(GarchError::SeriesTooShort { len: data.len(), min: MIN_OBSERVATIONS });
        }
        if let Some((index, &value)) = data.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(GarchError::NonFiniteData { index, value });
        }
        Ok(Self { data })
    }

    /// Construct from a slice, copying the values.
    pub fn from_slice(values: &[f64]) -> GarchResult<Self> {
        Self::new(Array1::from(values.to_vec()))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false` for a constructed series; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn view(&self) -> ArrayView1<'_, f64> {
        self.data.view()
    }

    /// Sample mean of the returns.
    pub fn mean(&self) -> f64 {
        self.data.sum() / self.data.len() as f64
    }

    /// Last observed return.
    pub fn last(&self) -> f64 {
        self.data[self.data.len() - 1]
    }
}
