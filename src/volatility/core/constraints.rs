//! Inequality constraints `g(θ) ≥ 0` for GJR-GARCH fits.
//!
//! Purpose
//! -------
//! Express the admissible parameter region as explicit, named linear forms
//! that can be evaluated and differentiated one at a time, and aggregate
//! them into a [`ConstraintSet`] that the fitter turns into a quadratic
//! exterior penalty.
//!
//! Key behaviors
//! -------------
//! - Gaussian model: `stationarity = 1 − α − β − γ/2`, `omega = ω`,
//!   `asymmetry = α + γ`, `beta = β`.
//! - Jump mixture: the four above plus `kappa = κ` and `lambda = λ`.
//! - [`ConstraintSet::penalty`] is `Σ min(0, gᵢ)²`, continuously
//!   differentiable, with gradient [`ConstraintSet::penalty_gradient`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Constraints only read indices valid for the layout they were built for;
//!   callers pass vectors of [`ConstraintSet::dim`] entries.
//! - The set is advisory for the optimizer: the variance guards keep the
//!   likelihood finite outside the region.
use crate::volatility::core::params::{
    ALPHA_IDX, BETA_IDX, GAMMA_IDX, KAPPA_IDX, LAMBDA_IDX, MIXTURE_N_PARAMS, NORMAL_N_PARAMS,
    OMEGA_IDX,
};
use ndarray::{Array1, ArrayView1};

/// Linear inequality `constant + Σ coefᵢ·θ[idxᵢ] ≥ 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub name: &'static str,
    pub constant: f64,
    pub terms: Vec<(usize, f64)>,
}

impl LinearConstraint {
    pub fn new(name: &'static str, constant: f64, terms: Vec<(usize, f64)>) -> Self {
        Self { name, constant, terms }
    }

    /// `g(θ)`; feasible when `≥ 0`.
    pub fn evaluate(&self, theta: ArrayView1<f64>) -> f64 {
        self.terms.iter().fold(self.constant, |acc, &(idx, coef)| acc + coef * theta[idx])
    }

    /// `∇g`, constant for a linear form.
    pub fn gradient(&self, dim: usize) -> Array1<f64> {
        let mut grad = Array1::zeros(dim);
        for &(idx, coef) in &self.terms {
            grad[idx] += coef;
        }
        grad
    }

    /// `max(0, −g(θ))`.
    pub fn violation(&self, theta: ArrayView1<f64>) -> f64 {
        (-self.evaluate(theta)).max(0.0)
    }
}

/// Named constraints for one parameter layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintSet {
    dim: usize,
    constraints: Vec<LinearConstraint>,
}

impl ConstraintSet {
    /// Constraints of the Gaussian model, `θ = (ω, α, β, γ, μ)`.
    pub fn normal() -> Self {
        Self { dim: NORMAL_N_PARAMS, constraints: garch_constraints() }
    }

    /// Constraints of the jump mixture, `θ = (ω, α, β, γ, μ, κ, λ)`.
    pub fn normal_poisson_mixture() -> Self {
        let mut constraints = garch_constraints();
        constraints.push(LinearConstraint::new("kappa", 0.0, vec![(KAPPA_IDX, 1.0)]));
        constraints.push(LinearConstraint::new("lambda", 0.0, vec![(LAMBDA_IDX, 1.0)]));
        Self { dim: MIXTURE_N_PARAMS, constraints }
    }

    /// Parameter dimension the set was built for.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LinearConstraint> {
        self.constraints.iter()
    }

    /// Look up a constraint by name.
    pub fn get(&self, name: &str) -> Option<&LinearConstraint> {
        self.constraints.iter().find(|c| c.name == name)
    }

    /// All `gᵢ(θ)` in declaration order.
    pub fn evaluate(&self, theta: ArrayView1<f64>) -> Array1<f64> {
        self.constraints.iter().map(|c| c.evaluate(theta)).collect()
    }

    /// Largest violation `maxᵢ max(0, −gᵢ(θ))`; zero when feasible.
    pub fn max_violation(&self, theta: ArrayView1<f64>) -> f64 {
        self.constraints.iter().map(|c| c.violation(theta)).fold(0.0, f64::max)
    }

    /// `true` when every `gᵢ(θ) ≥ −slack`.
    pub fn is_satisfied(&self, theta: ArrayView1<f64>, slack: f64) -> bool {
        self.max_violation(theta) <= slack
    }

    /// Quadratic exterior penalty `Σ min(0, gᵢ(θ))²`.
    pub fn penalty(&self, theta: ArrayView1<f64>) -> f64 {
        self.constraints
            .iter()
            .map(|c| {
                let g = c.evaluate(theta).min(0.0);
                g * g
            })
            .sum()
    }

    /// Gradient of [`ConstraintSet::penalty`]: `Σ 2·min(0, gᵢ)·∇gᵢ`.
    pub fn penalty_gradient(&self, theta: ArrayView1<f64>) -> Array1<f64> {
        let mut grad = Array1::zeros(theta.len());
        for c in &self.constraints {
            let g = c.evaluate(theta);
            if g < 0.0 {
                for &(idx, coef) in &c.terms {
                    grad[idx] += 2.0 * g * coef;
                }
            }
        }
        grad
    }
}

fn garch_constraints() -> Vec<LinearConstraint> {
    vec![
        LinearConstraint::new(
            "stationarity",
            1.0,
            vec![(ALPHA_IDX, -1.0), (BETA_IDX, -1.0), (GAMMA_IDX, -0.5)],
        ),
        LinearConstraint::new("omega", 0.0, vec![(OMEGA_IDX, 1.0)]),
        LinearConstraint::new("asymmetry", 0.0, vec![(ALPHA_IDX, 1.0), (GAMMA_IDX, 1.0)]),
        LinearConstraint::new("beta", 0.0, vec![(BETA_IDX, 1.0)]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Values of each named constraint.
    // - Feasibility reporting and the quadratic penalty with its gradient.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Each named constraint evaluates to its documented linear form.
    fn named_constraints_evaluate_as_documented() {
        // Arrange
        let set = ConstraintSet::normal_poisson_mixture();
        let theta = array![1e-5, 0.05, 0.85, 0.1, 0.0, 0.02, 0.3];

        // Act / Assert
        assert_eq!(set.len(), 6);
        assert_eq!(set.dim(), 7);
        assert!((set.get("stationarity").unwrap().evaluate(theta.view()) - 0.05).abs() < 1e-15);
        assert_eq!(set.get("omega").unwrap().evaluate(theta.view()), 1e-5);
        assert!((set.get("asymmetry").unwrap().evaluate(theta.view()) - 0.15).abs() < 1e-15);
        assert_eq!(set.get("lambda").unwrap().evaluate(theta.view()), 0.3);
        assert!(set.is_satisfied(theta.view(), 0.0));
        assert_eq!(set.penalty(theta.view()), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Violations are measured, penalized quadratically, and differentiated.
    //
    // Given
    // -----
    // - ω = −0.01 and persistence 1.1 (stationarity g = −0.1).
    //
    // Expect
    // ------
    // - max_violation = 0.1, penalty = 0.01 + 0.0001.
    // - Penalty gradient matches central differences.
    fn penalty_and_gradient_for_infeasible_point() {
        // Arrange
        let set = ConstraintSet::normal();
        let theta = array![-0.01, 0.2, 0.9, 0.0, 0.0];

        // Act
        let violation = set.max_violation(theta.view());
        let penalty = set.penalty(theta.view());
        let grad = set.penalty_gradient(theta.view());

        // Assert
        assert!((violation - 0.1).abs() < 1e-12);
        assert!((penalty - 0.0101).abs() < 1e-12);
        let h = 1e-7;
        for j in 0..theta.len() {
            let mut up = theta.clone();
            let mut dn = theta.clone();
            up[j] += h;
            dn[j] -= h;
            let fd = (set.penalty(up.view()) - set.penalty(dn.view())) / (2.0 * h);
            assert!((grad[j] - fd).abs() < 1e-6, "j={j}");
        }
        assert!(!set.is_satisfied(theta.view(), 1e-6));
    }

    #[test]
    // Purpose
    // -------
    // Constraint gradients are the coefficient vectors.
    fn constraint_gradient_is_coefficient_vector() {
        let set = ConstraintSet::normal();
        let grad = set.get("stationarity").unwrap().gradient(set.dim());
        assert_eq!(grad, array![0.0, -1.0, -1.0, -0.5, 0.0]);
    }
}
