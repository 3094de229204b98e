//! High-level entry points for minimizing a [`LossFunction`].
//!
//! [`minimize`] runs L-BFGS with the configured line search; [`minimize_nelder_mead`]
//! runs the derivative-free simplex method from the same starting point.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{build_nelder_mead, build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::{run_lbfgs, run_nelder_mead},
        traits::{LineSearcher, LossFunction, MLEOptions},
    },
};

/// Minimize a loss using L-BFGS with the chosen line search.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0, data)`.
/// - Builds an L-BFGS solver with Hager–Zhang or More–Thuente line search
///   based on `opts.line_searcher`.
/// - Runs it through [`run_lbfgs`].
///
/// # Errors
/// - Propagates errors from `f.check`, the builders, and the run itself
///   (e.g. line search failures).
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use rust_volatility::optimization::{
///     errors::OptResult,
///     loglik_optimizer::{minimize, LossFunction, MLEOptions, Theta},
/// };
///
/// struct Bowl;
/// impl LossFunction for Bowl {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok(theta.dot(theta))
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = minimize(&Bowl, array![0.1, -0.2, 0.3], &(), &MLEOptions::default())?;
/// println!("θ̂ = {:?}", out.theta_hat);
/// # Ok::<(), rust_volatility::optimization::errors::OptError>(())
/// ```
pub fn minimize<F: LossFunction>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}

/// Minimize a loss with Nelder–Mead.
///
/// Only `value` is used; gradients are never requested.
///
/// # Errors
/// - Propagates errors from `f.check`, [`build_nelder_mead`], and the run.
pub fn minimize_nelder_mead<F: LossFunction>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let solver = build_nelder_mead(&theta0, opts)?;
    let problem = ArgMinAdapter::new(f, data);
    run_nelder_mead(opts, problem, solver)
}
