//! Innovation distributions and their likelihood losses.
//!
//! Purpose
//! -------
//! Select the innovation law of a GJR-GARCH fit and dispatch everything that
//! depends on it: parameter count, loss evaluation, analytic gradient,
//! constraint set, and the scale needed to turn the loss Hessian into a
//! covariance.
//!
//! Key behaviors
//! -------------
//! - `Normal`: loss `Σₜ [(rₜ − μ)²/σ²ₜ + ln σ²ₜ]` (twice the negative
//!   log-likelihood up to a constant), with an analytic gradient through the
//!   variance sensitivities.
//! - `NormalPoissonMixture`: loss `−Σₜ ln f(rₜ; μ, σₜ, κ, λ)` with `f` the
//!   jump-mixture density. Negative `κ`/`λ` probes are projected to zero
//!   before evaluation; the penalty pushes the optimizer back.
//! - `GeneralizedHyperbolic`: declared, not implemented. Every operation
//!   returns `GarchError::NotImplemented`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Both losses sum over `t = 1..n−1`, pairing `rₜ` with `σ²ₜ`; the seed
//!   variance at `t = 0` is built from `r₀` itself and is excluded.
//! - Series shorter than two observations fail before the recursion runs.
//! - Losses are finite for any finite parameter vector because the variance
//!   path is clamped by [`VarianceGuards`].
//!
//! Conventions
//! -----------
//! - Names parse case-insensitively: `"normal"`, `"normal poisson mixture"`
//!   (or `normal_poisson_mixture`), `"generalized hyperbolic"` (or
//!   `generalized_hyperbolic`).
use crate::volatility::{
    core::{
        constraints::ConstraintSet,
        data::{MIN_OBSERVATIONS, ReturnSeries},
        guards::VarianceGuards,
        mixture::MixtureDensity,
        params::{KAPPA_IDX, LAMBDA_IDX, MIXTURE_N_PARAMS, MU_IDX, NORMAL_N_PARAMS},
        variance::{
            N_RECURSION_PARAMS, RecursionCoefficients, conditional_variances,
            variance_sensitivities,
        },
    },
    errors::{GarchError, GarchResult, ParamError},
};
use ndarray::{Array1, ArrayView1};
use std::str::FromStr;

/// Innovation distribution of a GJR-GARCH model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Distribution {
    Normal,
    NormalPoissonMixture,
    GeneralizedHyperbolic,
}

impl FromStr for Distribution {
    type Err = GarchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        match key.as_str() {
            "normal" => Ok(Distribution::Normal),
            "normal poisson mixture" => Ok(Distribution::NormalPoissonMixture),
            "generalized hyperbolic" => Ok(Distribution::GeneralizedHyperbolic),
            _ => Err(GarchError::UnknownDistribution { name: s.to_string() }),
        }
    }
}

impl std::fmt::Display for Distribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Distribution {
    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Distribution::Normal => "normal",
            Distribution::NormalPoissonMixture => "normal poisson mixture",
            Distribution::GeneralizedHyperbolic => "generalized hyperbolic",
        }
    }

    fn not_implemented(&self) -> GarchError {
        GarchError::NotImplemented { distribution: self.name() }
    }

    /// Length of the parameter vector.
    pub fn n_params(&self) -> GarchResult<usize> {
        match self {
            Distribution::Normal => Ok(NORMAL_N_PARAMS),
            Distribution::NormalPoissonMixture => Ok(MIXTURE_N_PARAMS),
            Distribution::GeneralizedHyperbolic => Err(self.not_implemented()),
        }
    }

    /// Constraint set `g(θ) ≥ 0` for this layout.
    pub fn constraints(&self) -> GarchResult<ConstraintSet> {
        match self {
            Distribution::Normal => Ok(ConstraintSet::normal()),
            Distribution::NormalPoissonMixture => Ok(ConstraintSet::normal_poisson_mixture()),
            Distribution::GeneralizedHyperbolic => Err(self.not_implemented()),
        }
    }

    /// Factor `c` such that the loss is `c · (−log-likelihood) + const`.
    ///
    /// The covariance of the estimates is `c · H⁻¹` with `H` the loss Hessian.
    pub fn loss_scale(&self) -> f64 {
        match self {
            Distribution::Normal => 2.0,
            Distribution::NormalPoissonMixture | Distribution::GeneralizedHyperbolic => 1.0,
        }
    }

    /// Evaluate the loss at `theta`.
    ///
    /// Errors
    /// ------
    /// - `GarchError::NotImplemented` for `GeneralizedHyperbolic`.
    /// - `GarchError::SeriesTooShort` for fewer than two returns.
    /// - `GarchError::Param` for a wrong-length or non-finite `theta`.
    pub fn evaluate(
        &self, theta: ArrayView1<f64>, returns: &ReturnSeries, guards: &VarianceGuards,
    ) -> GarchResult<f64> {
        match self {
            Distribution::Normal => normal_loss(theta, returns, guards),
            Distribution::NormalPoissonMixture => mixture_loss(theta, returns, guards),
            Distribution::GeneralizedHyperbolic => Err(self.not_implemented()),
        }
    }

    /// Analytic gradient of the loss, when one exists.
    ///
    /// Returns `Ok(None)` for the jump mixture; callers fall back to finite
    /// differences.
    pub fn gradient(
        &self, theta: ArrayView1<f64>, returns: &ReturnSeries, guards: &VarianceGuards,
    ) -> GarchResult<Option<Array1<f64>>> {
        match self {
            Distribution::Normal => normal_loss_gradient(theta, returns, guards).map(Some),
            Distribution::NormalPoissonMixture => Ok(None),
            Distribution::GeneralizedHyperbolic => Err(self.not_implemented()),
        }
    }
}

// ---- Loss implementations ----

fn check_inputs(theta: ArrayView1<f64>, expected: usize, returns: &ReturnSeries) -> GarchResult<()> {
    if returns.len() < MIN_OBSERVATIONS {
        return Err(GarchError::SeriesTooShort { len: returns.len(), min: MIN_OBSERVATIONS });
    }
    if theta.len() != expected {
        return Err(ParamError::ThetaLengthMismatch { expected, actual: theta.len() }.into());
    }
    if let Some((index, &value)) = theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(ParamError::NonFiniteParam { index, value }.into());
    }
    Ok(())
}

/// `Σ_{t=1}^{n−1} [(rₜ − μ)²/σ²ₜ + ln σ²ₜ]`.
fn normal_loss(
    theta: ArrayView1<f64>, returns: &ReturnSeries, guards: &VarianceGuards,
) -> GarchResult<f64> {
    check_inputs(theta, NORMAL_N_PARAMS, returns)?;
    let coeffs = RecursionCoefficients::from_theta(theta);
    let mu = theta[MU_IDX];
    let r = returns.view();
    let sigma2 = conditional_variances(&coeffs, r, guards);
    let loss = (1..r.len())
        .map(|t| {
            let e = r[t] - mu;
            e * e / sigma2[t] + sigma2[t].ln()
        })
        .sum();
    Ok(loss)
}

/// Gradient of [`normal_loss`] in the `(ω, α, β, γ, μ)` layout.
fn normal_loss_gradient(
    theta: ArrayView1<f64>, returns: &ReturnSeries, guards: &VarianceGuards,
) -> GarchResult<Array1<f64>> {
    check_inputs(theta, NORMAL_N_PARAMS, returns)?;
    let coeffs = RecursionCoefficients::from_theta(theta);
    let mu = theta[MU_IDX];
    let r = returns.view();
    let sigma2 = conditional_variances(&coeffs, r, guards);
    let sens = variance_sensitivities(&coeffs, r, sigma2.view(), guards);

    let mut grad = Array1::zeros(NORMAL_N_PARAMS);
    for t in 1..r.len() {
        let e = r[t] - mu;
        let inv = 1.0 / sigma2[t];
        let dloss_dsigma2 = (1.0 - e * e * inv) * inv;
        for j in 0..N_RECURSION_PARAMS {
            grad[j] += dloss_dsigma2 * sens[[t, j]];
        }
        grad[MU_IDX] -= 2.0 * e * inv;
    }
    Ok(grad)
}

/// `−Σ_{t=1}^{n−1} ln f(rₜ; μ, σₜ, κ⁺, λ⁺)` with `x⁺ = max(x, 0)`.
fn mixture_loss(
    theta: ArrayView1<f64>, returns: &ReturnSeries, guards: &VarianceGuards,
) -> GarchResult<f64> {
    check_inputs(theta, MIXTURE_N_PARAMS, returns)?;
    let coeffs = RecursionCoefficients::from_theta(theta);
    let mu = theta[MU_IDX];
    let mixture = MixtureDensity::new(theta[KAPPA_IDX].max(0.0), theta[LAMBDA_IDX].max(0.0))?;
    let r = returns.view();
    let sigma2 = conditional_variances(&coeffs, r, guards);
    let mut loss = 0.0;
    for t in 1..r.len() {
        loss -= mixture.log_density(r[t], mu, sigma2[t].sqrt())?;
    }
    Ok(loss)
}
