//! loglik_optimizer::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the numeric types and solver aliases used by the loss
//! minimizer so the rest of the optimization code does not spell out
//! `ndarray` or Argmin generics.
//!
//! Conventions
//! -----------
//! - `Cost` is the scalar loss being minimized (a negative log-likelihood,
//!   possibly with penalty terms added by the model layer).
//! - `Theta` and `Grad` have length equal to the number of free parameters;
//!   `Hessian` is `theta.len() × theta.len()`.
//! - `DEFAULT_LBFGS_MEM` is the L-BFGS history size used when options do not
//!   override it.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    neldermead::NelderMead,
    quasinewton::LBFGS,
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Parameter vector `θ`.
pub type Theta = Array1<f64>;

/// Gradient of the loss, same shape as [`Theta`].
pub type Grad = Array1<f64>;

/// Dense Hessian matrix; `n × n` for `n = Theta.len()`.
pub type Hessian = Array2<f64>;

/// Scalar loss value handed to the solver.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver
/// (e.g. `"cost_count"`, `"gradient_count"`).
pub type FnEvalMap = HashMap<String, u64>;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Relative perturbation used to build the initial Nelder–Mead simplex.
pub const DEFAULT_SIMPLEX_STEP: f64 = 0.05;

/// Absolute perturbation for simplex coordinates whose starting value is zero.
pub const ZERO_SIMPLEX_STEP: f64 = 0.00025;

/// Hager–Zhang line search specialized to this crate’s numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

/// More–Thuente line search specialized to this crate’s numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;

/// Derivative-free simplex solver used as a fallback.
pub type NelderMeadSolver = NelderMead<Theta, Cost>;
