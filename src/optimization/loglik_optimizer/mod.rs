//! loglik_optimizer — argmin-powered minimizer for likelihood-based losses.
//!
//! Purpose
//! -------
//! Provide a high-level optimization layer for **minimizing losses** such as
//! negative log-likelihoods. Callers implement [`LossFunction`] and invoke
//! [`minimize`] (L-BFGS with a configurable line search and finite-difference
//! fallbacks) or [`minimize_nelder_mead`] (derivative-free simplex).
//!
//! Key behaviors
//! -------------
//! - [`adapter::ArgMinAdapter`] exposes a loss as an Argmin cost function and
//!   gradient, differencing the cost when no analytic gradient exists.
//! - [`builders`] construct configured solvers; [`run`] executes them and
//!   normalizes the final state into an [`OptimOutcome`].
//! - [`finite_diff`] supplies validated finite-difference gradients and
//!   Hessians; [`validation`] centralizes shape and finiteness checks.
//!
//! Invariants & assumptions
//! ------------------------
//! - The loss handed to the solver is exactly what [`LossFunction::value`]
//!   returns; there is no sign convention to undo.
//! - Objectives treat invalid inputs as recoverable [`OptError`] values, not
//!   panics.
//! - [`OptimOutcome::converged`] is `true` only when the solver stopped on its
//!   own convergence test, never when it hit the iteration cap.
//!
//! Conventions
//! -----------
//! - Parameters live in whatever coordinates the model layer chooses (the
//!   volatility fitter works in a diagonally rescaled space); this module
//!   knows nothing about constraints.
//! - Errors bubble up as [`OptResult<T>`]; raw Argmin errors never escape.
//!
//! Testing notes
//! -------------
//! - Unit tests in each submodule cover solver construction, gradient
//!   fallbacks, validation, and small convex problems solved end to end.
//!
//! [`OptError`]: crate::optimization::errors::OptError
//! [`OptResult<T>`]: crate::optimization::errors::OptResult

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::{minimize, minimize_nelder_mead};
pub use self::traits::{LineSearcher, LossFunction, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Hessian, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_volatility::optimization::loglik_optimizer::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::api::{minimize, minimize_nelder_mead};
    pub use super::traits::{LineSearcher, LossFunction, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
