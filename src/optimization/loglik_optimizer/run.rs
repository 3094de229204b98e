//! Execution helpers that run an `argmin` solver on a [`LossFunction`] and
//! return a crate-friendly [`OptimOutcome`].
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, LossFunction, MLEOptions, OptimOutcome, Theta, adapter::ArgMinAdapter,
        types::NelderMeadSolver,
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient};
use argmin::core::{Executor, IterState, Solver, State};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;

/// Run a gradient-based `argmin` solver (L-BFGS) from `theta0`.
///
/// Sets the initial parameter and optional `max_iters` on the executor,
/// attaches a terminal observer when `obs_slog` is enabled and
/// `opts.verbose` is set, and converts the final state into an
/// [`OptimOutcome`].
///
/// # Errors
/// - Any `argmin` runtime error (line-search failure, objective error),
///   converted into `OptError`.
/// - Validation errors from [`OptimOutcome::new`].
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LossFunction,
    S: Solver<ArgMinAdapter<'a, F>, IterState<Theta, Grad, (), (), (), f64>> + Send + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(theta0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    OptimOutcome::new(
        result.take_best_param(),
        result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
    )
}

/// Run a derivative-free Nelder–Mead solver.
///
/// The starting point is encoded in the solver's initial simplex, so no
/// `param` is configured on the executor. `grad_norm` is always `None`.
///
/// # Errors
/// - Any `argmin` runtime error, converted into `OptError`.
/// - Validation errors from [`OptimOutcome::new`].
pub fn run_nelder_mead<'a, F>(
    opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: NelderMeadSolver,
) -> OptResult<OptimOutcome>
where
    F: LossFunction,
{
    let mut optimizer = Executor::new(problem, solver);
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    OptimOutcome::new(
        result.take_best_param(),
        result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        None,
    )
}

// ---- Helper Methods ----

#[cfg(feature = "obs_slog")]
fn log_initial_state<F>(theta0: &Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<()>
where
    F: LossFunction,
{
    let loss0 = problem.cost(theta0)?;
    let g0n = problem.gradient(theta0).ok().map(|g| g.l2_norm());

    eprintln!(
        "init: loss(theta0) = {:.6}{}",
        loss0,
        g0n.map(|n| format!(", ||grad|| = {:.6}", n)).unwrap_or_default()
    );
    Ok(())
}
