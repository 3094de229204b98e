//! models — GJR-GARCH fitting on top of `volatility::core`.
//!
//! Purpose
//! -------
//! Wire the distributions, constraint sets, and options of the core layer to
//! the generic loss minimizer, and return self-contained fit results.
//!
//! Key behaviors
//! -------------
//! - [`PenalizedObjective`]: loss plus weighted exterior penalty, in
//!   rescaled coordinates, implementing `LossFunction`.
//! - [`GjrGarchModel`] / [`fit`]: penalty continuation with an L-BFGS →
//!   Nelder–Mead fallback per round.
//! - [`FitResult`]: terminal parameters, convergence flag, loss, and
//!   [`FitDiagnostics`], plus volatility-path, forecast, and standard-error
//!   helpers.
pub mod gjr_garch;
pub mod objective;

pub use self::gjr_garch::{FitDiagnostics, FitResult, GjrGarchModel, fit};
pub use self::objective::PenalizedObjective;

pub mod prelude {
    pub use super::gjr_garch::{FitResult, GjrGarchModel, fit};
}
