//! GJR-GARCH(1,1) fitter: penalty continuation over argmin solvers.
//!
//! Purpose
//! -------
//! Estimate `θ` by minimizing a distribution's loss subject to its
//! constraint set, and package the result with the diagnostics callers need
//! to judge it.
//!
//! Key behaviors
//! -------------
//! - Round `k` minimizes `loss(θ) + wₖ · Σ min(0, gᵢ(θ))²` with
//!   `wₖ = initial_weight · growth^k · n`, starting from the previous
//!   round's point.
//! - Each round rescales coordinates by `max(|θ|, 1e-4)` at its start and
//!   runs L-BFGS; if L-BFGS returns an error, Nelder–Mead restarts from the
//!   same point. If both fail the fit keeps the last good point and is
//!   marked not converged.
//! - Rounds stop early once the iterate is feasible within
//!   `feasibility_tol`.
//! - `converged` requires both a convergence stop in the final round and
//!   feasibility; otherwise a `warn!` event is emitted. Non-convergence is
//!   never an `Err`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `FitResult::nll` is the plain loss at `θ̂`, without penalty.
//! - The generalized hyperbolic law fails with `NotImplemented` before any
//!   optimization.
//! - A fit is a pure function of `(returns, distribution, options)`.
use crate::{
    inference::hessian::calc_standard_errors,
    optimization::{
        loglik_optimizer::{FnEvalMap, OptimOutcome, Theta, minimize, minimize_nelder_mead},
        numerical_stability::{parameter_scale, to_scaled},
    },
    volatility::{
        core::{
            data::ReturnSeries,
            distributions::Distribution,
            forecasts,
            guards::VarianceGuards,
            init::initial_theta,
            options::GarchOptions,
            params::GjrGarchParams,
            variance::{RecursionCoefficients, conditional_variances},
        },
        errors::GarchResult,
        models::objective::PenalizedObjective,
    },
};
use ndarray::Array1;
use tracing::{debug, warn};

const SOLVER_LBFGS: &str = "L-BFGS";
const SOLVER_NELDER_MEAD: &str = "Nelder-Mead";

/// Optimizer bookkeeping attached to a [`FitResult`].
///
/// Fields
/// ------
/// - `iterations`: solver iterations summed over rounds.
/// - `status`: termination status of the final round.
/// - `solver`: solver that produced the final point.
/// - `fn_evals`: argmin evaluation counters summed over rounds.
/// - `penalty_rounds`: rounds actually run.
/// - `final_penalty_weight`: weight of the last round, including the `n`
///   factor.
/// - `max_violation`: largest constraint violation at `θ̂`.
/// - `grad_norm`: final gradient norm in scaled coordinates, when the solver
///   reports one.
#[derive(Debug, Clone, PartialEq)]
pub struct FitDiagnostics {
    pub iterations: usize,
    pub status: String,
    pub solver: String,
    pub fn_evals: FnEvalMap,
    pub penalty_rounds: usize,
    pub final_penalty_weight: f64,
    pub max_violation: f64,
    pub grad_norm: Option<f64>,
}

/// Outcome of one fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    pub distribution: Distribution,
    /// Terminal parameter vector in the distribution's layout.
    pub theta: Array1<f64>,
    pub converged: bool,
    /// Loss at `theta`, without penalty.
    pub nll: f64,
    pub diagnostics: FitDiagnostics,
    pub variance_guards: VarianceGuards,
    pub feasibility_tol: f64,
}

impl FitResult {
    /// Typed parameters, tolerating violations up to `feasibility_tol`.
    ///
    /// Errors
    /// ------
    /// - `GarchError::Param` when the terminal point is infeasible beyond the
    ///   tolerance (possible only for a non-converged fit).
    pub fn params(&self) -> GarchResult<GjrGarchParams> {
        Ok(GjrGarchParams::from_theta_with_slack(self.theta.view(), self.feasibility_tol)?)
    }

    /// In-sample conditional variances `σ²ₜ` at `θ̂`.
    pub fn conditional_variances(&self, returns: &ReturnSeries) -> Array1<f64> {
        let coeffs = RecursionCoefficients::from_theta(self.theta.view());
        conditional_variances(&coeffs, returns.view(), &self.variance_guards)
    }

    /// In-sample conditional volatilities `σₜ`.
    pub fn volatility_path(&self, returns: &ReturnSeries) -> Array1<f64> {
        self.conditional_variances(returns).mapv(f64::sqrt)
    }

    /// Variance forecasts for horizons `1..=horizon` past the end of
    /// `returns`.
    pub fn forecast_variance(
        &self, returns: &ReturnSeries, horizon: usize,
    ) -> GarchResult<Array1<f64>> {
        let params = self.params()?;
        let sigma2 = self.conditional_variances(returns);
        let last_variance = sigma2[sigma2.len() - 1];
        forecasts::forecast_variance(
            &params,
            returns.last(),
            last_variance,
            horizon,
            &self.variance_guards,
        )
    }

    /// Asymptotic standard errors of `θ̂` from the loss Hessian.
    pub fn standard_errors(&self, returns: &ReturnSeries) -> GarchResult<Array1<f64>> {
        calc_standard_errors(self.distribution, &self.theta, returns, &self.variance_guards)
    }
}

/// GJR-GARCH(1,1) model specification: innovation law plus fit options.
#[derive(Debug, Clone, PartialEq)]
pub struct GjrGarchModel {
    pub distribution: Distribution,
    pub options: GarchOptions,
}

impl GjrGarchModel {
    pub fn new(distribution: Distribution, options: GarchOptions) -> Self {
        Self { distribution, options }
    }

    /// Fit the model to `returns`.
    ///
    /// Errors
    /// ------
    /// - `GarchError::NotImplemented` for the generalized hyperbolic law.
    /// - `GarchError::InvalidInitLength` / `InvalidInitValue` for a bad
    ///   fixed start.
    /// - Errors from evaluating the loss at the terminal point.
    ///
    /// Solver failures and non-convergence are reported through
    /// [`FitResult::converged`] and [`FitDiagnostics`].
    pub fn fit(&self, returns: &ReturnSeries) -> GarchResult<FitResult> {
        let distribution = self.distribution;
        let opts = &self.options;
        let constraints = distribution.constraints()?;
        let mut theta = initial_theta(&opts.init, distribution, returns)?;
        let n = returns.len() as f64;

        let mut iterations = 0;
        let mut fn_evals = FnEvalMap::new();
        let mut status = String::from("Not started");
        let mut solver = SOLVER_LBFGS;
        let mut grad_norm = None;
        let mut round_converged = false;
        let mut rounds_run = 0;
        let mut weight = 0.0;
        let mut max_violation = constraints.max_violation(theta.view());

        for round in 0..opts.penalty.rounds {
            rounds_run = round + 1;
            weight = opts.penalty.weight(round) * n;
            let scale = parameter_scale(theta.view());
            let u0 = to_scaled(theta.view(), scale.view());
            let objective = PenalizedObjective::new(
                distribution,
                &constraints,
                &opts.variance_guards,
                weight,
                scale,
            );

            let Some((outcome, used)) = run_round(&objective, u0, returns, opts) else {
                round_converged = false;
                status = String::from("All solvers failed");
                break;
            };

            theta = objective.to_model(&outcome.theta_hat);
            max_violation = constraints.max_violation(theta.view());
            iterations += outcome.iterations;
            for (key, count) in &outcome.fn_evals {
                *fn_evals.entry(key.clone()).or_insert(0) += count;
            }
            round_converged = outcome.converged;
            status = outcome.status;
            solver = used;
            grad_norm = outcome.grad_norm;

            debug!(
                round,
                weight,
                value = outcome.value,
                max_violation,
                converged = round_converged,
                solver = used,
                "penalty round finished"
            );

            if max_violation <= opts.feasibility_tol {
                break;
            }
        }

        let nll = distribution.evaluate(theta.view(), returns, &opts.variance_guards)?;
        let converged = round_converged && max_violation <= opts.feasibility_tol;
        if !converged {
            warn!(
                distribution = distribution.name(),
                status = status.as_str(),
                max_violation,
                "GJR-GARCH fit did not converge"
            );
        }

        Ok(FitResult {
            distribution,
            theta,
            converged,
            nll,
            diagnostics: FitDiagnostics {
                iterations,
                status,
                solver: solver.to_string(),
                fn_evals,
                penalty_rounds: rounds_run,
                final_penalty_weight: weight,
                max_violation,
                grad_norm,
            },
            variance_guards: opts.variance_guards,
            feasibility_tol: opts.feasibility_tol,
        })
    }
}

/// Fit with default options.
pub fn fit(returns: &ReturnSeries, distribution: Distribution) -> GarchResult<FitResult> {
    GjrGarchModel::new(distribution, GarchOptions::default()).fit(returns)
}

/// L-BFGS, then Nelder–Mead from the same start on error.
fn run_round(
    objective: &PenalizedObjective<'_>, u0: Theta, returns: &ReturnSeries, opts: &GarchOptions,
) -> Option<(OptimOutcome, &'static str)> {
    match minimize(objective, u0.clone(), returns, &opts.mle_opts) {
        Ok(outcome) => Some((outcome, SOLVER_LBFGS)),
        Err(lbfgs_err) => {
            warn!(error = %lbfgs_err, "L-BFGS failed; falling back to Nelder-Mead");
            match minimize_nelder_mead(objective, u0, returns, &opts.mle_opts) {
                Ok(outcome) => Some((outcome, SOLVER_NELDER_MEAD)),
                Err(nm_err) => {
                    warn!(error = %nm_err, "Nelder-Mead failed; keeping previous point");
                    None
                }
            }
        }
    }
}
