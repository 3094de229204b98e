//! core — GJR-GARCH data, parameters, recursion, densities, and options.
//!
//! Purpose
//! -------
//! Collect the building blocks of the GJR-GARCH(1,1) stack: the validated
//! return series, the parameter layout, the guarded variance recursion, the
//! innovation distributions with their losses, the constraint set, and the
//! configuration structs. The fitter in `volatility::models` wires these to
//! the generic optimizer.
//!
//! Key behaviors
//! -------------
//! - [`ReturnSeries`] validates input once; everything downstream borrows it.
//! - [`conditional_variances`] runs the clamped recursion for any finite
//!   coefficients; [`variance_sensitivities`] feeds the analytic gradient.
//! - [`Distribution`] dispatches loss, gradient, constraints, and parameter
//!   count per innovation law.
//! - [`forecast_variance`] and [`simulate`] reuse the same step outside the
//!   sample.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; `σ²ₜ` uses returns up to `t − 1`, except the seed.
//! - Parameter vectors are raw `Array1<f64>` in the layout of [`params`].
//! - No I/O and no logging at this level.
pub mod constraints;
pub mod data;
pub mod distributions;
pub mod forecasts;
pub mod guards;
pub mod init;
pub mod mixture;
pub mod options;
pub mod params;
pub mod simulation;
pub mod variance;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::constraints::{ConstraintSet, LinearConstraint};
pub use self::data::ReturnSeries;
pub use self::distributions::Distribution;
pub use self::forecasts::forecast_variance;
pub use self::guards::VarianceGuards;
pub use self::init::{Init, initial_theta};
pub use self::mixture::MixtureDensity;
pub use self::options::{GarchOptions, PenaltySchedule, SimOpts};
pub use self::params::{GjrGarchParams, JumpParams};
pub use self::simulation::{SimulatedPath, simulate};
pub use self::variance::{RecursionCoefficients, conditional_variances, variance_sensitivities};

pub mod prelude {
    pub use super::{
        ConstraintSet, Distribution, GarchOptions, GjrGarchParams, Init, PenaltySchedule,
        ReturnSeries, SimOpts, VarianceGuards,
    };
}
