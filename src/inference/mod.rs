//! inference — post-estimation uncertainty for fitted volatility models.
//!
//! Purpose
//! -------
//! Compute classical (observed-information) standard errors at a fitted
//! parameter vector, in the raw parameter layout the fitter reports.
//!
//! Key behaviors
//! -------------
//! - [`calc_standard_errors`]: finite-difference Hessian of the loss,
//!   rescaled to the log-likelihood, pseudo-inverted through a symmetric
//!   eigen-decomposition (`nalgebra`).
//!
//! Downstream usage
//! ----------------
//! - Usually reached through `FitResult::standard_errors`.
pub mod hessian;

pub use self::hessian::calc_standard_errors;
