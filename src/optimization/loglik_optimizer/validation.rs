//! Validation helpers shared by the minimizer.
//!
//! - Tolerances: [`verify_tol_grad`], [`verify_tol_cost`].
//! - Derivatives: [`validate_grad`], [`validate_hessian`].
//! - Solver output: [`validate_theta_hat`], [`validate_value`].
//!
//! Every helper reports the first offending entry through a dedicated
//! [`OptError`] variant.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{Grad, Theta, types::Hessian},
};

/// `None` is accepted; `Some(tol)` must be finite and strictly positive.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    match tol {
        Some(tol) if !tol.is_finite() => {
            Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." })
        }
        Some(tol) if tol <= 0.0 => {
            Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." })
        }
        _ => Ok(()),
    }
}

/// `None` is accepted; `Some(tol)` must be finite and strictly positive.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    match tol {
        Some(tol) if !tol.is_finite() => {
            Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." })
        }
        Some(tol) if tol <= 0.0 => {
            Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." })
        }
        _ => Ok(()),
    }
}

/// Gradient must have length `dim` and only finite entries.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    if let Some((index, &value)) = grad.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(OptError::InvalidGradient {
            index,
            value,
            reason: "Gradient elements must be finite.",
        });
    }
    Ok(())
}

/// Unwrap the solver's best parameter, which must be present and finite.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    let theta = theta_hat.ok_or(OptError::MissingThetaHat)?;
    if let Some((index, &value)) = theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(OptError::InvalidThetaHat {
            index,
            value,
            reason: "Parameter estimates must be finite.",
        });
    }
    Ok(theta)
}

/// Loss values must be finite; sign is irrelevant.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

/// Hessian must be `dim × dim` with only finite entries.
pub fn validate_hessian(hessian: &Hessian, dim: usize) -> OptResult<()> {
    if hessian.nrows() != dim || hessian.ncols() != dim {
        return Err(OptError::HessianDimMismatch {
            expected: dim,
            found: (hessian.nrows(), hessian.ncols()),
        });
    }
    for ((row, col), &value) in hessian.indexed_iter() {
        if !value.is_finite() {
            return Err(OptError::InvalidHessian { row, col, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    #[test]
    fn tolerance_checks_accept_none_and_reject_non_positive() {
        assert!(verify_tol_grad(None).is_ok());
        assert!(verify_tol_cost(Some(1e-8)).is_ok());
        assert!(matches!(verify_tol_grad(Some(0.0)), Err(OptError::InvalidTolGrad { .. })));
        assert!(matches!(
            verify_tol_cost(Some(f64::NAN)),
            Err(OptError::InvalidTolCost { .. })
        ));
    }

    #[test]
    fn grad_and_theta_hat_report_first_non_finite_entry() {
        // Arrange
        let grad = array![1.0, f64::INFINITY, f64::NAN];
        let theta = array![0.0, 0.0, f64::NAN];

        // Act
        let grad_err = validate_grad(&grad, 3).unwrap_err();
        let theta_err = validate_theta_hat(Some(theta)).unwrap_err();

        // Assert
        assert!(matches!(grad_err, OptError::InvalidGradient { index: 1, .. }));
        assert!(matches!(theta_err, OptError::InvalidThetaHat { index: 2, .. }));
        assert_eq!(validate_theta_hat(None), Err(OptError::MissingThetaHat));
    }

    #[test]
    fn hessian_shape_is_checked_before_entries() {
        // Arrange
        let wrong_shape = Array2::<f64>::zeros((2, 3));
        let mut bad_entry = Array2::<f64>::eye(2);
        bad_entry[[1, 0]] = f64::NAN;

        // Act / Assert
        assert!(matches!(
            validate_hessian(&wrong_shape, 2),
            Err(OptError::HessianDimMismatch { expected: 2, found: (2, 3) })
        ));
        assert!(matches!(
            validate_hessian(&bad_entry, 2),
            Err(OptError::InvalidHessian { row: 1, col: 0, .. })
        ));
    }
}
