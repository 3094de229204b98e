//! Public API surface for loss minimization.
//!
//! - [`LossFunction`]: trait implemented by objectives (negative
//!   log-likelihoods, penalized losses).
//! - [`MLEOptions`] and [`Tolerances`]: configuration for the optimizer.
//! - [`LineSearcher`]: choice of line search used by L-BFGS.
//! - [`OptimOutcome`]: normalized result returned by [`minimize`] and
//!   [`minimize_nelder_mead`].
//!
//! Convention: the objective *is* the cost. Values and analytic gradients are
//! handed to argmin unchanged, so a negative log-likelihood is implemented
//! directly rather than as a log-likelihood to be sign-flipped.
//!
//! [`minimize`]: crate::optimization::loglik_optimizer::minimize
//! [`minimize_nelder_mead`]: crate::optimization::loglik_optimizer::minimize_nelder_mead
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Cost, FnEvalMap, Grad, Theta,
        types::DEFAULT_SIMPLEX_STEP,
        validation::{validate_theta_hat, validate_value, verify_tol_cost, verify_tol_grad},
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// Objective interface for the minimizer.
///
/// - `type Data`: per-model data carried into `value`/`grad`/`check`.
///
/// Required:
/// - `value(&Theta, &Data) -> OptResult<Cost>`: evaluate the loss.
/// - `check(&Theta, &Data) -> OptResult<()>`: reject obviously invalid
///   `θ`/`data` pairs. Called once before optimization.
///
/// Optional:
/// - `grad(&Theta, &Data) -> OptResult<Grad>`: analytic gradient of the loss.
///   When absent, finite differences of `value` are used.
pub trait LossFunction {
    type Data: 'static;

    // Required methods
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    // Optional methods
    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Choice of line search used inside the L-BFGS solver.
///
/// Parsing is case-insensitive (`"MoreThuente"`, `"HagerZhang"`). Unknown
/// names return `OptError::InvalidLineSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Optimizer-level configuration.
///
/// Fields:
/// - `tols`: numerical tolerances and iteration limits.
/// - `line_searcher`: line-search algorithm used by L-BFGS.
/// - `verbose`: attach a terminal observer (behind the `obs_slog` feature).
/// - `lbfgs_mem`: L-BFGS history size; `None` uses [`DEFAULT_LBFGS_MEM`].
/// - `simplex_step`: relative perturbation of the initial Nelder–Mead simplex.
///
/// Default:
/// - `tols`: `tol_grad = 1e-6`, `tol_cost = 1e-10`, `max_iter = 500`
/// - `line_searcher`: `MoreThuente`
/// - `verbose`: `false`
/// - `lbfgs_mem`: `None`
/// - `simplex_step`: [`DEFAULT_SIMPLEX_STEP`]
///
/// [`DEFAULT_LBFGS_MEM`]: crate::optimization::loglik_optimizer::DEFAULT_LBFGS_MEM
#[derive(Debug, Clone, PartialEq)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
    pub simplex_step: f64,
}

impl MLEOptions {
    /// Create a new set of optimizer options.
    ///
    /// # Errors
    /// - [`OptError::InvalidLBFGSMem`] if `lbfgs_mem == Some(0)`.
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, line_searcher, verbose: false, lbfgs_mem, simplex_step: DEFAULT_SIMPLEX_STEP })
    }

    /// Override the relative step of the initial Nelder–Mead simplex.
    ///
    /// # Errors
    /// - [`OptError::InvalidSimplexStep`] unless `step` is finite and `> 0`.
    pub fn with_simplex_step(mut self, step: f64) -> OptResult<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(OptError::InvalidSimplexStep {
                step,
                reason: "Simplex step must be finite and positive.",
            });
        }
        self.simplex_step = step;
        Ok(self)
    }

    /// Toggle the progress observer.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl Default for MLEOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { tol_grad: Some(1e-6), tol_cost: Some(1e-10), max_iter: Some(500) },
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
            simplex_step: DEFAULT_SIMPLEX_STEP,
        }
    }
}

/// Numerical tolerances and iteration limits used by the optimizer.
///
/// - `tol_grad`: terminate when the gradient norm falls below this threshold.
/// - `tol_cost`: terminate when the change in cost falls below this threshold.
///   Nelder–Mead reuses it as the tolerance on the standard deviation of the
///   simplex costs.
/// - `max_iter`: hard cap on the number of iterations.
///
/// At least one of the three must be provided (see [`Tolerances::new`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for
    ///   non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Canonical result returned by the minimizers.
///
/// - `theta_hat`: best parameter vector found.
/// - `value`: best loss value.
/// - `converged`: `true` only when the solver stopped on its own convergence
///   criterion (not on the iteration cap).
/// - `status`: human-readable termination status string.
/// - `iterations`: number of optimizer iterations performed.
/// - `fn_evals`: function-evaluation counters reported by `argmin`.
/// - `grad_norm`: norm of the last available gradient, if present.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl OptimOutcome {
    /// Build a validated [`OptimOutcome`] from raw solver state.
    ///
    /// # Errors
    /// - Propagates validation errors for `theta_hat` or `value`.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: TerminationStatus,
        iterations: u64, fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        let (converged, status) = match &termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            TerminationStatus::Terminated(reason) => (
                matches!(
                    reason,
                    TerminationReason::SolverConverged | TerminationReason::TargetCostReached
                ),
                format!("{termination:?}"),
            ),
        };
        let iterations = iterations as usize;
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self { theta_hat, value, converged, status, iterations, fn_evals, grad_norm })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Validation in `Tolerances::new` and `MLEOptions::new`.
    // - Case-insensitive parsing of `LineSearcher`.
    // - Mapping of argmin termination reasons onto `OptimOutcome::converged`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // All-`None` tolerances are rejected; a zero iteration cap is rejected.
    fn tolerances_reject_empty_and_zero_max_iter() {
        // Arrange / Act
        let empty = Tolerances::new(None, None, None);
        let zero_iter = Tolerances::new(Some(1e-6), None, Some(0));

        // Assert
        assert_eq!(empty, Err(OptError::NoTolerancesProvided));
        assert!(matches!(zero_iter, Err(OptError::InvalidMaxIter { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Zero L-BFGS memory and non-positive simplex steps are configuration errors.
    fn mle_options_validate_memory_and_simplex_step() {
        // Arrange
        let tols = Tolerances::new(Some(1e-6), None, Some(100)).unwrap();

        // Act
        let bad_mem = MLEOptions::new(tols, LineSearcher::HagerZhang, Some(0));
        let bad_step = MLEOptions::new(tols, LineSearcher::HagerZhang, None)
            .unwrap()
            .with_simplex_step(-0.1);

        // Assert
        assert!(matches!(bad_mem, Err(OptError::InvalidLBFGSMem { mem: 0, .. })));
        assert!(matches!(bad_step, Err(OptError::InvalidSimplexStep { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Line searcher names parse regardless of case.
    fn line_searcher_parses_case_insensitively() {
        assert_eq!("morethuente".parse::<LineSearcher>(), Ok(LineSearcher::MoreThuente));
        assert_eq!("HAGERZHANG".parse::<LineSearcher>(), Ok(LineSearcher::HagerZhang));
        assert!("bfgs".parse::<LineSearcher>().is_err());
    }

    #[test]
    // Purpose
    // -------
    // Hitting the iteration cap is a terminated run but not a converged one.
    //
    // Given
    // -----
    // - Identical raw states differing only in termination reason.
    //
    // Expect
    // ------
    // - `SolverConverged` maps to `converged = true`.
    // - `MaxItersReached` maps to `converged = false`.
    fn outcome_distinguishes_convergence_from_iteration_cap() {
        // Arrange
        let theta = array![0.1, 0.2];
        let converged = TerminationStatus::Terminated(TerminationReason::SolverConverged);
        let capped = TerminationStatus::Terminated(TerminationReason::MaxItersReached);

        // Act
        let ok = OptimOutcome::new(Some(theta.clone()), 1.0, converged, 10, FnEvalMap::new(), None)
            .unwrap();
        let cap = OptimOutcome::new(
            Some(theta),
            1.0,
            capped,
            10,
            FnEvalMap::new(),
            Some(array![3.0, 4.0]),
        )
        .unwrap();

        // Assert
        assert!(ok.converged);
        assert!(!cap.converged);
        assert_eq!(cap.grad_norm, Some(5.0));
    }
}
