//! Penalized, rescaled loss handed to the optimizer in each penalty round.
//!
//! Purpose
//! -------
//! Combine a distribution's loss with the quadratic exterior penalty of its
//! constraint set, expressed in diagonally rescaled coordinates so that
//! `ω ≈ 1e-5` and `β ≈ 0.9` move on comparable scales.
//!
//! Key behaviors
//! -------------
//! - Solver coordinates `u` map to model coordinates by `θ = s ∘ u`.
//! - `value(u) = loss(θ) + w · Σ min(0, gᵢ(θ))²`.
//! - `grad(u) = s ∘ (∇loss(θ) + w · ∇penalty(θ))` when the distribution has
//!   an analytic gradient; otherwise `GradientNotImplemented`, which sends
//!   the adapter to finite differences.
use crate::{
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::{Cost, Grad, LossFunction, Theta},
        numerical_stability::from_scaled,
    },
    volatility::core::{
        constraints::ConstraintSet, data::ReturnSeries, distributions::Distribution,
        guards::VarianceGuards,
    },
};
use ndarray::Array1;

/// Loss plus weighted penalty in scaled coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PenalizedObjective<'a> {
    pub distribution: Distribution,
    pub constraints: &'a ConstraintSet,
    pub guards: &'a VarianceGuards,
    pub weight: f64,
    pub scale: Array1<f64>,
}

impl<'a> PenalizedObjective<'a> {
    pub fn new(
        distribution: Distribution, constraints: &'a ConstraintSet, guards: &'a VarianceGuards,
        weight: f64, scale: Array1<f64>,
    ) -> Self {
        Self { distribution, constraints, guards, weight, scale }
    }

    /// Model coordinates of a solver point.
    pub fn to_model(&self, u: &Theta) -> Theta {
        from_scaled(u.view(), self.scale.view())
    }
}

impl LossFunction for PenalizedObjective<'_> {
    type Data = ReturnSeries;

    fn value(&self, u: &Theta, data: &ReturnSeries) -> OptResult<Cost> {
        let theta = self.to_model(u);
        let loss = self.distribution.evaluate(theta.view(), data, self.guards)?;
        Ok(loss + self.weight * self.constraints.penalty(theta.view()))
    }

    fn check(&self, u: &Theta, _data: &ReturnSeries) -> OptResult<()> {
        if u.len() != self.scale.len() {
            return Err(OptError::ThetaLengthMismatch {
                expected: self.scale.len(),
                actual: u.len(),
            });
        }
        match u.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            Some((index, &value)) => Err(OptError::InvalidThetaInput { index, value }),
            None => Ok(()),
        }
    }

    fn grad(&self, u: &Theta, data: &ReturnSeries) -> OptResult<Grad> {
        let theta = self.to_model(u);
        let loss_grad = self
            .distribution
            .gradient(theta.view(), data, self.guards)?
            .ok_or(OptError::GradientNotImplemented)?;
        let penalty_grad = self.constraints.penalty_gradient(theta.view());
        Ok((loss_grad + penalty_grad * self.weight) * &self.scale)
    }
}
