//! GJR-GARCH options — configuration for estimation and simulation.
//!
//! Purpose
//! -------
//! Collect the knobs of a fit (starting point, optimizer settings, variance
//! guards, penalty schedule, feasibility tolerance) and of a simulation
//! (seed, burn-in, starting variance) in validated, cloneable structs.
//!
//! Key behaviors
//! -------------
//! - [`PenaltySchedule`] describes the exterior-penalty continuation: round
//!   `k` uses weight `initial_weight · growth^k`, multiplied by the series
//!   length by the fitter so the penalty keeps pace with the summed loss.
//! - [`GarchOptions`] bundles already-validated components; only the
//!   feasibility tolerance is checked here.
//! - [`SimOpts`] carries simulation intent; the simulator validates it
//!   against the parameters.
//!
//! Invariants & assumptions
//! ------------------------
//! - `initial_weight > 0`, `growth ≥ 1`, `rounds ≥ 1`, all finite.
//! - `feasibility_tol ≥ 0` and finite.
use crate::{
    optimization::loglik_optimizer::MLEOptions,
    volatility::{
        core::{guards::VarianceGuards, init::Init},
        errors::{GarchError, GarchResult},
    },
};

pub const DEFAULT_PENALTY_WEIGHT: f64 = 10.0;
pub const DEFAULT_PENALTY_GROWTH: f64 = 10.0;
pub const DEFAULT_PENALTY_ROUNDS: usize = 8;
pub const DEFAULT_FEASIBILITY_TOL: f64 = 1e-6;
pub const DEFAULT_BURN_IN: usize = 500;

/// Continuation schedule of the quadratic exterior penalty.
///
/// Fields
/// ------
/// - `initial_weight`: weight per observation of the first round.
/// - `growth`: multiplicative increase between rounds.
/// - `rounds`: maximum number of rounds; the fitter stops earlier once the
///   iterate is feasible within the feasibility tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltySchedule {
    pub initial_weight: f64,
    pub growth: f64,
    pub rounds: usize,
}

impl PenaltySchedule {
    /// Errors
    /// ------
    /// - `GarchError::InvalidPenaltySchedule` naming the offending value.
    pub fn new(initial_weight: f64, growth: f64, rounds: usize) -> GarchResult<Self> {
        if !initial_weight.is_finite() || initial_weight <= 0.0 {
            return Err(GarchError::InvalidPenaltySchedule {
                value: initial_weight,
                reason: "Initial weight must be finite and > 0.",
            });
        }
        if !growth.is_finite() || growth < 1.0 {
            return Err(GarchError::InvalidPenaltySchedule {
                value: growth,
                reason: "Growth factor must be finite and >= 1.",
            });
        }
        if rounds == 0 {
            return Err(GarchError::InvalidPenaltySchedule {
                value: 0.0,
                reason: "At least one penalty round is required.",
            });
        }
        Ok(Self { initial_weight, growth, rounds })
    }

    /// Per-observation weight of round `round` (0-based).
    pub fn weight(&self, round: usize) -> f64 {
        self.initial_weight * self.growth.powi(round as i32)
    }
}

impl Default for PenaltySchedule {
    fn default() -> Self {
        Self {
            initial_weight: DEFAULT_PENALTY_WEIGHT,
            growth: DEFAULT_PENALTY_GROWTH,
            rounds: DEFAULT_PENALTY_ROUNDS,
        }
    }
}

/// GarchOptions — estimation-time configuration for GJR-GARCH models.
///
/// Fields
/// ------
/// - `init`: starting point policy ([`Init`]).
/// - `mle_opts`: tolerances and line search of every inner L-BFGS run.
/// - `variance_guards`: clamp bounds of the variance recursion.
/// - `penalty`: exterior-penalty schedule.
/// - `feasibility_tol`: largest constraint violation a converged fit may
///   carry; also the slack used when building typed parameters from a fit.
///
/// Default
/// -------
/// Priors, `MLEOptions::default()`, guards `(1e-12, 1e12)`, the default
/// schedule, and `feasibility_tol = 1e-6`.
#[derive(Debug, Clone, PartialEq)]
pub struct GarchOptions {
    pub init: Init,
    pub mle_opts: MLEOptions,
    pub variance_guards: VarianceGuards,
    pub penalty: PenaltySchedule,
    pub feasibility_tol: f64,
}

impl GarchOptions {
    /// Errors
    /// ------
    /// - `GarchError::InvalidFeasibilityTol` unless `feasibility_tol` is
    ///   finite and `>= 0`.
    pub fn new(
        init: Init, mle_opts: MLEOptions, variance_guards: VarianceGuards,
        penalty: PenaltySchedule, feasibility_tol: f64,
    ) -> GarchResult<Self> {
        if !feasibility_tol.is_finite() || feasibility_tol < 0.0 {
            return Err(GarchError::InvalidFeasibilityTol { value: feasibility_tol });
        }
        Ok(Self { init, mle_opts, variance_guards, penalty, feasibility_tol })
    }
}

impl Default for GarchOptions {
    fn default() -> Self {
        Self {
            init: Init::default(),
            mle_opts: MLEOptions::default(),
            variance_guards: VarianceGuards::default(),
            penalty: PenaltySchedule::default(),
            feasibility_tol: DEFAULT_FEASIBILITY_TOL,
        }
    }
}

/// SimOpts — configuration for synthetic GJR-GARCH paths.
///
/// Fields
/// ------
/// - `seed`: RNG seed; `Some` gives reproducible paths, `None` draws from
///   system entropy.
/// - `burn_in`: number of leading draws discarded before output starts.
/// - `initial_variance`: variance of the first draw; `None` uses the
///   unconditional variance (or `ω` when the process is not stationary).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimOpts {
    pub seed: Option<u64>,
    pub burn_in: usize,
    pub initial_variance: Option<f64>,
}

impl SimOpts {
    pub fn new(seed: Option<u64>, burn_in: usize, initial_variance: Option<f64>) -> Self {
        Self { seed, burn_in, initial_variance }
    }
}

impl Default for SimOpts {
    fn default() -> Self {
        Self { seed: Some(42), burn_in: DEFAULT_BURN_IN, initial_variance: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Validation and weights of `PenaltySchedule`.
    // - Feasibility-tolerance validation and defaults of `GarchOptions`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Round weights grow geometrically from the initial weight.
    fn penalty_weight_grows_geometrically() {
        // Arrange
        let schedule = PenaltySchedule::new(2.0, 5.0, 3).unwrap();

        // Act / Assert
        assert_eq!(schedule.weight(0), 2.0);
        assert_eq!(schedule.weight(1), 10.0);
        assert_eq!(schedule.weight(2), 50.0);
    }

    #[test]
    // Purpose
    // -------
    // Non-positive weights, shrinking growth, and zero rounds are rejected.
    fn penalty_schedule_rejects_bad_values() {
        assert!(matches!(
            PenaltySchedule::new(0.0, 10.0, 3),
            Err(GarchError::InvalidPenaltySchedule { .. })
        ));
        assert!(matches!(
            PenaltySchedule::new(1.0, 0.5, 3),
            Err(GarchError::InvalidPenaltySchedule { .. })
        ));
        assert!(matches!(
            PenaltySchedule::new(1.0, 10.0, 0),
            Err(GarchError::InvalidPenaltySchedule { .. })
        ));
        assert!(PenaltySchedule::new(1.0, 1.0, 1).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // `GarchOptions::new` validates the tolerance and keeps its inputs.
    fn garch_options_validate_feasibility_tol() {
        // Arrange
        let defaults = GarchOptions::default();

        // Act
        let ok = GarchOptions::new(
            Init::Priors,
            MLEOptions::default(),
            VarianceGuards::default(),
            PenaltySchedule::default(),
            1e-8,
        )
        .unwrap();
        let bad = GarchOptions::new(
            Init::Priors,
            MLEOptions::default(),
            VarianceGuards::default(),
            PenaltySchedule::default(),
            f64::NAN,
        );

        // Assert
        assert_eq!(defaults.feasibility_tol, DEFAULT_FEASIBILITY_TOL);
        assert_eq!(ok.feasibility_tol, 1e-8);
        assert!(matches!(bad, Err(GarchError::InvalidFeasibilityTol { .. })));
    }
}
