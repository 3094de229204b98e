//! loglik_optimizer::finite_diff — finite-difference gradient and Hessian helpers.
//!
//! Purpose
//! -------
//! Provide finite-difference gradients and Hessians around a parameter
//! vector, with validation and symmetry cleanup, so the minimizer and the
//! standard-error code never call the `finitediff` API directly.
//!
//! Key behaviors
//! -------------
//! - [`run_fd_diff`]: forward-difference gradient with error capture and
//!   post-hoc validation. The adapter uses it as the retry path when a
//!   central-difference gradient fails.
//! - [`compute_hessian`]: central-difference Hessian of a gradient map,
//!   falling back to forward differences when validation fails, then
//!   symmetrized.
//!
//! Conventions
//! -----------
//! - Differences are taken in whatever coordinates the caller passes; the
//!   model layer is responsible for any rescaling.
//! - Errors raised by the objective during differencing are parked in a
//!   shared `closure_err` cell and surfaced as `OptError` values.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, Theta,
        types::Hessian,
        validation::{validate_grad, validate_hessian},
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Forward-difference gradient of `func` at `theta` with error capture.
///
/// `func` is expected to write any evaluation error into `closure_err` and
/// return `NaN`. The cell is cleared on entry and inspected afterwards.
///
/// # Errors
/// - The error captured in `closure_err`, converted into `OptError`.
/// - `OptError::GradientDimMismatch` / `OptError::InvalidGradient` from
///   [`validate_grad`].
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

/// Finite-difference Hessian of the gradient map `f` at `theta`.
///
/// Central differences are tried first; if the result fails
/// [`validate_hessian`], a forward-difference Hessian is validated and used
/// instead. The returned matrix is symmetrized.
///
/// # Errors
/// - `OptError::HessianDimMismatch` / `OptError::InvalidHessian` when the
///   forward-difference fallback also fails validation.
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut cent_hess = theta.central_hessian(f);
    if validate_hessian(&cent_hess, dim).is_ok() {
        symmetrize_hess(&mut cent_hess);
        return Ok(cent_hess);
    }
    let mut forward_hess = theta.forward_hessian(f);
    validate_hessian(&forward_hess, dim)?;
    symmetrize_hess(&mut forward_hess);
    Ok(forward_hess)
}

// ---- Helper methods ----

/// Average each off-diagonal pair in place; the diagonal is untouched.
fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use argmin::core::ArgminError;
    use ndarray::{Array1, Array2};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Forward-difference gradients with and without closure errors.
    // - Finite-difference Hessians of linear and non-finite gradient maps.
    // - In-place symmetrization.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A smooth cubic yields an accurate forward-difference gradient.
    //
    // Given
    // -----
    // - f(θ) = θ₀³ + 2θ₁ at θ = (1, -3).
    //
    // Expect
    // ------
    // - ∇f ≈ (3, 2) with all entries finite.
    fn run_fd_diff_cubic_matches_analytic_gradient() {
        // Arrange
        let theta: Theta = Array1::from(vec![1.0_f64, -3.0]);
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |x: &Theta| x[0].powi(3) + 2.0 * x[1];

        // Act
        let grad = run_fd_diff(&theta, &f, &closure_err).unwrap();

        // Assert
        assert!((grad[0] - 3.0).abs() < 1e-5);
        assert!((grad[1] - 2.0).abs() < 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // An error parked by the closure wins over the numeric result.
    fn run_fd_diff_closure_error_is_propagated() {
        // Arrange
        let theta: Theta = Array1::from(vec![1.0_f64]);
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |_: &Theta| {
            closure_err
                .replace(Some(ArgminError::NotImplemented { text: "probe".to_string() }.into()));
            f64::NAN
        };

        // Act
        let err = run_fd_diff(&theta, &f, &closure_err).unwrap_err();

        // Assert
        assert!(matches!(err, OptError::NotImplemented { .. }));
    }

    #[test]
    // Purpose
    // -------
    // A NaN objective without a parked error fails gradient validation.
    fn run_fd_diff_nan_objective_yields_invalid_gradient() {
        // Arrange
        let theta: Theta = Array1::from(vec![0.0_f64, 1.0]);
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |_x: &Theta| f64::NAN;

        // Act
        let err = run_fd_diff(&theta, &f, &closure_err).unwrap_err();

        // Assert
        assert!(matches!(err, OptError::InvalidGradient { .. }));
    }

    #[test]
    // Purpose
    // -------
    // The Hessian of a quadratic with cross term is recovered and symmetric.
    //
    // Given
    // -----
    // - f(θ) = θ₀² + θ₀θ₁ + 3θ₁², gradient (2θ₀ + θ₁, θ₀ + 6θ₁).
    //
    // Expect
    // ------
    // - H ≈ [[2, 1], [1, 6]].
    fn compute_hessian_recovers_quadratic_form() {
        // Arrange
        let theta: Theta = Array1::from(vec![0.3_f64, -0.7]);
        let grad_fn = |t: &Theta| Array1::from(vec![2.0 * t[0] + t[1], t[0] + 6.0 * t[1]]);

        // Act
        let hess = compute_hessian(&grad_fn, &theta).unwrap();

        // Assert
        assert!((hess[[0, 0]] - 2.0).abs() < 1e-6);
        assert!((hess[[1, 1]] - 6.0).abs() < 1e-6);
        assert!((hess[[0, 1]] - 1.0).abs() < 1e-6);
        assert_eq!(hess[[0, 1]], hess[[1, 0]]);
    }

    #[test]
    // Purpose
    // -------
    // Non-finite gradients surface as `InvalidHessian` after both attempts.
    fn compute_hessian_non_finite_entries_yield_invalid_hessian() {
        // Arrange
        let theta: Theta = Array1::from(vec![0.0_f64]);
        let grad_fn = |_theta: &Theta| Array1::from(vec![f64::NAN]);

        // Act
        let err = compute_hessian(&grad_fn, &theta).unwrap_err();

        // Assert
        assert!(matches!(err, OptError::InvalidHessian { .. }));
    }

    #[test]
    // Purpose
    // -------
    // Symmetrization averages off-diagonal pairs and keeps the diagonal.
    fn symmetrize_hess_averages_off_diagonal() {
        // Arrange
        let mut h: Hessian = Array2::from_shape_vec((2, 2), vec![1.0_f64, 2.0, 0.0, 3.0]).unwrap();

        // Act
        symmetrize_hess(&mut h);

        // Assert
        assert_eq!(h[[0, 0]], 1.0);
        assert_eq!(h[[1, 1]], 3.0);
        assert_eq!(h[[0, 1]], 1.0);
        assert_eq!(h[[1, 0]], 1.0);
    }
}
