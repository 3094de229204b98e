//! numerical_stability — scaling and log-space helpers for the fitter.
//!
//! Purpose
//! -------
//! Collect small numerical primitives shared by the optimizer, the
//! volatility likelihoods, and the standard-error code so every layer uses
//! the same tolerances and guarded formulas.
//!
//! Key behaviors
//! -------------
//! - Diagonal parameter rescaling (`parameter_scale`, `to_scaled`,
//!   `from_scaled`) used by the constrained fitter.
//! - Overflow-safe `ln Σ exp` (`safe_log_sum_exp`) used by the jump-mixture
//!   density.
//! - A shared eigenvalue cutoff (`EIGEN_EPS`) for Hessian pseudo-inverses.
//!
//! Conventions
//! -----------
//! - Pure functions over `f64` and `ndarray` views; no logging or I/O.
//! - Inputs are assumed finite; validation happens in the model layer.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    EIGEN_EPS, SCALE_FLOOR, from_scaled, parameter_scale, safe_log_sum_exp, to_scaled,
};

pub mod prelude {
    pub use super::transformations::{
        EIGEN_EPS, from_scaled, parameter_scale, safe_log_sum_exp, to_scaled,
    };
}
