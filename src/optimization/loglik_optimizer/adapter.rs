//! Adapter that exposes a [`LossFunction`] as an `argmin` problem.
//!
//! The loss is handed to argmin unchanged. Analytic gradients are validated
//! and forwarded; when an objective has none, the gradient is finite-differenced
//! from the cost closure (central first, forward as a retry).
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    loglik_optimizer::{
        finite_diff::run_fd_diff,
        traits::LossFunction,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// Bridges a [`LossFunction`] to `argmin`'s `CostFunction` and `Gradient`.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LossFunction> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: LossFunction> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate the loss, rejecting non-finite values with
    /// [`OptError::NonFiniteCost`].
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.value(theta, self.data)?;
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(output)
    }
}

impl<'a, F: LossFunction> Gradient for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Evaluate the gradient of the loss at `θ`.
    ///
    /// - Analytic gradients are validated and returned as-is.
    /// - `GradientNotImplemented` triggers finite differences of the cost.
    ///   Central differences are tried first; if any cost evaluation failed
    ///   or the result is not finite, forward differences are used instead.
    ///
    /// The FD closure must return `f64`, so the first error raised inside it is
    /// parked in `closure_err` and the closure returns `NaN`.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                Ok(g)
            }
            Err(OptError::GradientNotImplemented) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                let cost_func = |theta: &Theta| -> f64 {
                    match self.cost(theta) {
                        Ok(val) => val,
                        Err(e) => {
                            let mut slot = closure_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            f64::NAN
                        }
                    }
                };
                let fd_grad = theta.central_diff(&cost_func);
                if closure_err.borrow().is_none() && validate_grad(&fd_grad, dim).is_ok() {
                    return Ok(fd_grad);
                }
                Ok(run_fd_diff(theta, &cost_func, &closure_err)?)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl<'a, F: LossFunction> ArgMinAdapter<'a, F> {
    /// Construct a new adapter over an objective and its data.
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptResult;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Cost passthrough (no sign flip).
    // - Analytic gradient passthrough and finite-difference fallback.
    // - Rejection of non-finite costs.
    // -------------------------------------------------------------------------

    struct Bowl;

    impl LossFunction for Bowl {
        type Data = f64;

        fn value(&self, theta: &Theta, shift: &f64) -> OptResult<Cost> {
            Ok(theta.mapv(|x| (x - shift).powi(2)).sum())
        }

        fn check(&self, _theta: &Theta, _data: &f64) -> OptResult<()> {
            Ok(())
        }
    }

    struct AnalyticBowl;

    impl LossFunction for AnalyticBowl {
        type Data = ();

        fn value(&self, theta: &Theta, _data: &()) -> OptResult<Cost> {
            Ok(theta.dot(theta))
        }

        fn check(&self, _theta: &Theta, _data: &()) -> OptResult<()> {
            Ok(())
        }

        fn grad(&self, theta: &Theta, _data: &()) -> OptResult<Grad> {
            Ok(theta.mapv(|x| 2.0 * x))
        }
    }

    struct Exploding;

    impl LossFunction for Exploding {
        type Data = ();

        fn value(&self, _theta: &Theta, _data: &()) -> OptResult<Cost> {
            Ok(f64::INFINITY)
        }

        fn check(&self, _theta: &Theta, _data: &()) -> OptResult<()> {
            Ok(())
        }
    }

    #[test]
    // Purpose
    // -------
    // The loss reaches argmin unchanged and the FD gradient matches 2(θ - c).
    fn cost_is_passed_through_and_fd_gradient_is_accurate() {
        // Arrange
        let shift = 1.0;
        let adapter = ArgMinAdapter::new(&Bowl, &shift);
        let theta = array![2.0, -1.0];

        // Act
        let cost = adapter.cost(&theta).unwrap();
        let grad = adapter.gradient(&theta).unwrap();

        // Assert
        assert!((cost - 5.0).abs() < 1e-12);
        assert!((grad[0] - 2.0).abs() < 1e-5);
        assert!((grad[1] + 4.0).abs() < 1e-5);
    }

    #[test]
    // Purpose
    // -------
    // Analytic gradients are forwarded without modification.
    fn analytic_gradient_is_forwarded() {
        // Arrange
        let adapter = ArgMinAdapter::new(&AnalyticBowl, &());
        let theta = array![0.5, -0.25];

        // Act
        let grad = adapter.gradient(&theta).unwrap();

        // Assert
        assert_eq!(grad, array![1.0, -0.5]);
    }

    #[test]
    // Purpose
    // -------
    // A non-finite loss is surfaced as `NonFiniteCost`.
    fn non_finite_cost_is_rejected() {
        // Arrange
        let adapter = ArgMinAdapter::new(&Exploding, &());

        // Act
        let err = adapter.cost(&array![0.0]).unwrap_err();

        // Assert
        assert!(matches!(OptError::from(err), OptError::NonFiniteCost { .. }));
    }
}
