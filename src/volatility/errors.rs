//! Errors for GJR-GARCH volatility models (data validation, options checks,
//! density parameters, distribution selection, and optimizer failures).
//!
//! This module defines a model error type, [`GarchError`], and a parameter
//! error type, [`ParamError`]. Both implement `Display`/`Error` and convert to
//! `PyErr` when the `python-bindings` feature is enabled.
//!
//! ## Conventions
//! - **Indices are 0-based** (match Rust/NumPy).
//! - Return series must be finite and hold at least two observations.
//! - Optimizer non-convergence is *not* an error: it is reported through the
//!   fit diagnostics. [`GarchError::OptimizationFailed`] is reserved for
//!   configuration problems surfaced by the optimizer layer.
#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*};
use statrs::distribution::{NormalError, PoissonError};

use crate::optimization::errors::OptError;

/// Crate-wide result alias for volatility operations that may produce [`GarchError`].
pub type GarchResult<T> = Result<T, GarchError>;

/// Result alias for parameter construction and validation.
pub type ParamResult<T> = Result<T, ParamError>;

/// Unified error type for GJR-GARCH modeling.
#[derive(Debug, Clone, PartialEq)]
pub enum GarchError {
    // ---- Input/data validation ----
    /// Series has fewer observations than the likelihood needs.
    SeriesTooShort { len: usize, min: usize },

    /// A return is NaN/±inf.
    NonFiniteData { index: usize, value: f64 },

    // ---- Distribution selection ----
    /// Distribution name is not recognised.
    UnknownDistribution { name: String },

    /// Distribution is declared but has no likelihood yet.
    NotImplemented { distribution: &'static str },

    // ---- Density parameters ----
    /// Mixture density parameters must be finite with sigma > 0 and kappa, lambda >= 0.
    InvalidDensityParam { param: &'static str, value: f64, reason: &'static str },

    /// Wrapper for statrs::distribution::NormalError
    InvalidNormalParam,

    /// Wrapper for statrs::distribution::PoissonError
    InvalidPoissonParam,

    // ---- Options validation ----
    /// Variance guards must be finite with 0 < min < max.
    InvalidVarianceGuards { min: f64, max: f64, reason: &'static str },

    /// Penalty schedule must have positive finite weight, growth >= 1, and rounds >= 1.
    InvalidPenaltySchedule { value: f64, reason: &'static str },

    /// Feasibility tolerance must be finite and >= 0.
    InvalidFeasibilityTol { value: f64 },

    /// Init::Fixed vector length must match the distribution.
    InvalidInitLength { expected: usize, actual: usize },

    /// Init::Fixed entries must be finite.
    InvalidInitValue { index: usize, value: f64 },

    // ---- Forecast / simulation ----
    /// Forecast horizon must be at least 1.
    InvalidHorizon { horizon: usize },

    /// Simulated path length must be at least 1.
    InvalidSimulationLength { n: usize },

    /// Starting variance of a simulation must be finite and > 0.
    InvalidInitialVariance { value: f64 },

    // ---- Parameters ----
    /// Parameter construction or validation failed.
    Param(ParamError),

    // ---- Estimation / optimizer ----
    /// Optimizer rejected its configuration; include a human-readable status.
    OptimizationFailed { status: String },
}

impl std::error::Error for GarchError {}

impl std::fmt::Display for GarchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            GarchError::SeriesTooShort { len, min } => {
                write!(f, "Return series has {len} observations; at least {min} are required.")
            }
            GarchError::NonFiniteData { index, value } => {
                write!(f, "Return at index {index} is non-finite: {value}")
            }
            // ---- Distribution selection ----
            GarchError::UnknownDistribution { name } => {
                write!(
                    f,
                    "Unknown distribution '{name}'. Valid options are 'normal', \
                     'normal poisson mixture' and 'generalized hyperbolic'."
                )
            }
            GarchError::NotImplemented { distribution } => {
                write!(f, "Likelihood for the {distribution} distribution is not implemented.")
            }
            // ---- Density parameters ----
            GarchError::InvalidDensityParam { param, value, reason } => {
                write!(f, "Invalid mixture density parameter {param} = {value}: {reason}")
            }
            GarchError::InvalidNormalParam => {
                write!(f, "Normal distribution requires a finite mean and standard deviation > 0.")
            }
            GarchError::InvalidPoissonParam => {
                write!(f, "Poisson distribution requires a finite rate > 0.")
            }
            // ---- Options validation ----
            GarchError::InvalidVarianceGuards { min, max, reason } => {
                write!(
                    f,
                    "Variance guards must be finite with 0 < min ({min}) < max ({max}); {reason}"
                )
            }
            GarchError::InvalidPenaltySchedule { value, reason } => {
                write!(f, "Invalid penalty schedule value {value}: {reason}")
            }
            GarchError::InvalidFeasibilityTol { value } => {
                write!(f, "Feasibility tolerance must be finite and >= 0; got: {value}")
            }
            GarchError::InvalidInitLength { expected, actual } => {
                write!(f, "Init::Fixed must have length {expected}, got {actual}")
            }
            GarchError::InvalidInitValue { index, value } => {
                write!(f, "Init::Fixed entry at index {index} must be finite, got {value}")
            }
            // ---- Forecast / simulation ----
            GarchError::InvalidHorizon { horizon } => {
                write!(f, "Forecast horizon must be at least 1; got: {horizon}")
            }
            GarchError::InvalidSimulationLength { n } => {
                write!(f, "Simulated path length must be at least 1; got: {n}")
            }
            GarchError::InvalidInitialVariance { value } => {
                write!(f, "Initial variance must be finite and > 0; got: {value}")
            }
            // ---- Parameters ----
            GarchError::Param(err) => {
                write!(f, "Invalid parameters: {err}")
            }
            // ---- Estimation / optimizer ----
            GarchError::OptimizationFailed { status } => {
                write!(f, "Optimizer failed with status: {status}")
            }
        }
    }
}

/// Convert a [`GarchError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl std::convert::From<GarchError> for PyErr {
    fn from(err: GarchError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

impl From<NormalError> for GarchError {
    fn from(_: NormalError) -> GarchError {
        GarchError::InvalidNormalParam
    }
}

impl From<PoissonError> for GarchError {
    fn from(_: PoissonError) -> GarchError {
        GarchError::InvalidPoissonParam
    }
}

impl From<ParamError> for GarchError {
    fn from(err: ParamError) -> GarchError {
        GarchError::Param(err)
    }
}

impl From<OptError> for GarchError {
    fn from(err: OptError) -> GarchError {
        GarchError::OptimizationFailed { status: err.to_string() }
    }
}

/// Errors specific to parameter construction and validation.
///
/// Layout is `θ = (ω, α, β, γ, μ)` for the Gaussian likelihood and
/// `θ = (ω, α, β, γ, μ, κ, λ)` for the jump mixture.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// Theta length does not match the distribution.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Every coordinate must be finite.
    NonFiniteParam { index: usize, value: f64 },

    /// Omega must be >= 0.
    InvalidOmega { value: f64 },

    /// Beta must be >= 0.
    InvalidBeta { value: f64 },

    /// Alpha + gamma must be >= 0.
    InvalidAsymmetry { alpha: f64, gamma: f64 },

    /// alpha + beta + gamma / 2 must not exceed 1.
    StationarityViolated { persistence: f64 },

    /// Jump scale kappa must be >= 0.
    InvalidKappa { value: f64 },

    /// Jump intensity lambda must be >= 0.
    InvalidLambda { value: f64 },
}

impl std::error::Error for ParamError {}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, got {actual}")
            }
            ParamError::NonFiniteParam { index, value } => {
                write!(f, "Parameter at index {index} must be finite, got {value}")
            }
            ParamError::InvalidOmega { value } => {
                write!(f, "Omega must be finite and >= 0, got {value}")
            }
            ParamError::InvalidBeta { value } => {
                write!(f, "Beta must be finite and >= 0, got {value}")
            }
            ParamError::InvalidAsymmetry { alpha, gamma } => {
                write!(f, "Alpha + gamma must be >= 0, got alpha = {alpha}, gamma = {gamma}")
            }
            ParamError::StationarityViolated { persistence } => {
                write!(
                    f,
                    "Model not stationary: alpha + beta + gamma / 2 is {persistence} (> 1 is not allowed)"
                )
            }
            ParamError::InvalidKappa { value } => {
                write!(f, "Jump scale kappa must be finite and >= 0, got {value}")
            }
            ParamError::InvalidLambda { value } => {
                write!(f, "Jump intensity lambda must be finite and >= 0, got {value}")
            }
        }
    }
}

/// Convert a [`ParamError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl std::convert::From<ParamError> for PyErr {
    fn from(err: ParamError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
