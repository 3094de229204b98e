//! optimization — loss minimizer, numerical helpers, and unified error surface.
//!
//! Purpose
//! -------
//! Provide the optimization layer used to fit volatility models: an
//! Argmin-backed minimizer for negative log-likelihoods, numerically stable
//! helpers, and a single error/result surface. Callers implement a loss,
//! choose tolerances, and obtain fitted parameters and diagnostics without
//! touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - `loglik_optimizer`: L-BFGS (Hager–Zhang or More–Thuente line search)
//!   and Nelder–Mead entrypoints, finite-difference fallbacks, and solver
//!   configuration.
//! - `numerical_stability`: parameter rescaling, log-sum-exp, and shared
//!   tolerances.
//! - `errors`: `OptError` and `OptResult<T>`, with conversions from Argmin
//!   and from volatility-layer errors.
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer is unconstrained. Constraints are handled by the model
//!   layer (penalty terms added to the loss).
//! - Invalid states are reported as `OptError`, never as panics.
//!
//! Conventions
//! -----------
//! - Losses are minimized as returned; there is no internal sign flip.
//! - This module does not log. The volatility fitter reports progress with
//!   `tracing`; the optional `obs_slog` feature attaches Argmin's terminal
//!   observer when `MLEOptions::verbose` is set.
//!
//! Testing notes
//! -------------
//! - Submodule unit tests cover solver wiring, tolerance handling, gradient
//!   fallbacks, and small convex problems.
//! - Integration tests exercise the stack end to end through model fits.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_volatility::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
