//! Observed-information standard errors for fitted GJR-GARCH parameters.
//!
//! Purpose
//! -------
//! Turn a fitted parameter vector into asymptotic standard errors using the
//! finite-difference Hessian of the distribution's loss.
//!
//! Key behaviors
//! -------------
//! - The gradient map is the analytic gradient when the distribution has one
//!   (Gaussian) and central differences of the loss otherwise (jump mixture).
//! - The Hessian `H` of the loss is divided by the distribution's loss scale
//!   `c`, giving the observed information of the log-likelihood; the
//!   covariance is its pseudo-inverse.
//! - The pseudo-inverse keeps eigenvalues above `EIGEN_EPS · max λ`, so flat
//!   or negative-curvature directions contribute nothing instead of blowing
//!   up.
//!
//! Invariants & assumptions
//! ------------------------
//! - `θ̂` should be an interior local minimum; at binding constraints the
//!   numbers are those of the unconstrained quadratic approximation.
//! - The returned vector has the length of `θ̂`, every entry finite and
//!   non-negative.
use crate::{
    optimization::{
        errors::OptError,
        loglik_optimizer::{Grad, Theta, finite_diff::compute_hessian},
        numerical_stability::EIGEN_EPS,
    },
    volatility::{
        core::{data::ReturnSeries, distributions::Distribution, guards::VarianceGuards},
        errors::{GarchError, GarchResult, ParamError},
    },
};
use finitediff::FiniteDiff;
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};
use std::cell::RefCell;

/// Standard errors of `theta_hat` under `distribution`.
///
/// Errors
/// ------
/// - `GarchError::NotImplemented` for the generalized hyperbolic law.
/// - `GarchError::Param(ThetaLengthMismatch)` for a vector of the wrong
///   length.
/// - The first error raised while evaluating the loss or its gradient.
/// - `GarchError::OptimizationFailed` when no finite Hessian can be formed.
pub fn calc_standard_errors(
    distribution: Distribution, theta_hat: &Theta, returns: &ReturnSeries,
    guards: &VarianceGuards,
) -> GarchResult<Array1<f64>> {
    let n_params = distribution.n_params()?;
    if theta_hat.len() != n_params {
        return Err(
            ParamError::ThetaLengthMismatch { expected: n_params, actual: theta_hat.len() }.into()
        );
    }

    let first_err: RefCell<Option<GarchError>> = RefCell::new(None);
    let park = |err: GarchError| {
        let mut slot = first_err.borrow_mut();
        if slot.is_none() {
            *slot = Some(err);
        }
    };
    let loss = |theta: &Theta| -> f64 {
        distribution.evaluate(theta.view(), returns, guards).unwrap_or_else(|err| {
            park(err);
            f64::NAN
        })
    };
    let gradient = |theta: &Theta| -> Grad {
        match distribution.gradient(theta.view(), returns, guards) {
            Ok(Some(grad)) => grad,
            Ok(None) => theta.central_diff(&loss),
            Err(err) => {
                park(err);
                Array1::from_elem(theta.len(), f64::NAN)
            }
        }
    };

    let hessian = compute_hessian(&gradient, theta_hat);
    if let Some(err) = first_err.take() {
        return Err(err);
    }
    let hessian = hessian.map_err(|err: OptError| GarchError::OptimizationFailed {
        status: err.to_string(),
    })?;

    let mut info = DMatrix::<f64>::zeros(n_params, n_params);
    fill_dmatrix(&hessian, distribution.loss_scale(), &mut info);
    Ok(solve_for_se(info, n_params))
}

// ---- Helper methods ----

/// Copy `hess / scale` into `out`.
fn fill_dmatrix(hess: &Array2<f64>, scale: f64, out: &mut DMatrix<f64>) {
    for ((i, j), &value) in hess.indexed_iter() {
        out[(i, j)] = value / scale;
    }
}

/// `sqrt(diag(pinv(info)))` through the symmetric eigen-decomposition.
fn solve_for_se(info: DMatrix<f64>, n: usize) -> Array1<f64> {
    let eigen = info.symmetric_eigen();
    let q = eigen.eigenvectors;
    let lambda_max = eigen.eigenvalues.iter().copied().fold(0.0_f64, f64::max);
    let cutoff = EIGEN_EPS * lambda_max;
    let mut se = Array1::<f64>::zeros(n);
    for i in 0..n {
        let var: f64 = eigen
            .eigenvalues
            .iter()
            .enumerate()
            .filter(|(_, lambda)| **lambda > cutoff && **lambda > 0.0)
            .map(|(k, &lambda)| q[(i, k)] * q[(i, k)] / lambda)
            .sum();
        se[i] = var.sqrt();
    }
    se
}
