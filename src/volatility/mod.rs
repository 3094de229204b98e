//! volatility — GJR-GARCH(1,1) estimation stack: core numerics, models, errors.
//!
//! Purpose
//! -------
//! Fit a GJR-GARCH(1,1) conditional-variance model to a return series by
//! maximum likelihood under Gaussian or Gaussian–Poisson jump innovations,
//! and use the fit for volatility paths, forecasts, simulation, and
//! standard errors.
//!
//! Key behaviors
//! -------------
//! - [`core`]: return series, parameter layout, guarded recursion, mixture
//!   density, distributions, constraint set, and options.
//! - [`models`]: the penalty-method fitter ([`GjrGarchModel`], [`fit`]) and
//!   its result type ([`FitResult`]).
//! - [`errors`]: [`GarchError`] / [`ParamError`] with result aliases.
//!
//! Invariants & assumptions
//! ------------------------
//! - Each fit is a batch computation on one series; results are returned
//!   values and no model state is cached between calls.
//! - Non-convergence is reported through `FitResult::converged`, never as an
//!   error.
//!
//! Downstream usage
//! ----------------
//! ```no_run
//! use rust_volatility::volatility::prelude::*;
//!
//! let returns = ReturnSeries::from_slice(&[0.01, -0.02, 0.015, -0.005, 0.008])?;
//! let result = fit(&returns, "normal".parse()?)?;
//! println!("nll = {}, converged = {}", result.nll, result.converged);
//! # Ok::<(), rust_volatility::volatility::errors::GarchError>(())
//! ```
pub mod core;
pub mod errors;
pub mod models;

pub use self::core::{
    ConstraintSet, Distribution, GarchOptions, GjrGarchParams, Init, PenaltySchedule,
    ReturnSeries, SimOpts, VarianceGuards,
};
pub use self::errors::{GarchError, GarchResult, ParamError, ParamResult};
pub use self::models::{FitDiagnostics, FitResult, GjrGarchModel, fit};

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::errors::{GarchError, GarchResult};
    pub use super::models::prelude::*;
}
