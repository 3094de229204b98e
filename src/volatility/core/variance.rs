//! Conditional-variance recursion for GJR-GARCH(1,1).
//!
//! Purpose
//! -------
//! Turn a parameter vector and a return series into the conditional variance
//! path `σ²₀, …, σ²ₙ₋₁`, and optionally the sensitivities of that path with
//! respect to `(ω, α, β, γ)` for analytic gradients.
//!
//! Key behaviors
//! -------------
//! - Seed: `σ²₀ = ω + (α + γ·1[r₀<0] + β)·r₀²`.
//! - Step: `σ²ₜ = ω + (α + γ·1[rₜ₋₁<0])·r²ₜ₋₁ + β·σ²ₜ₋₁`.
//! - Every value passes through [`VarianceGuards::clamp`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Output length equals input length; every entry is in `[min, max]` of the
//!   guards, for *any* finite coefficients (the optimizer probes infeasible
//!   points during a penalized search).
//! - Raw returns enter the recursion; the mean `μ` only affects the
//!   likelihood residuals.
//! - The index-`t` variance uses information up to `t − 1` (except the seed,
//!   which uses `r₀`). Likelihoods therefore pair `rₜ` with `σ²ₜ` for
//!   `t = 1..n−1`.
//!
//! Conventions
//! -----------
//! - Square roots are taken only for display (`volatility_path` on the fit).
//! - Sensitivities at clamped steps are zero, matching the flat clamp.
use crate::volatility::core::{
    guards::VarianceGuards,
    params::{ALPHA_IDX, BETA_IDX, GAMMA_IDX, OMEGA_IDX},
};
use ndarray::{Array1, Array2, ArrayView1};

/// Number of recursion coefficients `(ω, α, β, γ)`.
pub const N_RECURSION_PARAMS: usize = 4;

/// Recursion coefficients read from the front of a raw parameter vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecursionCoefficients {
    pub omega: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl RecursionCoefficients {
    /// Read `(ω, α, β, γ)` from `theta`, which must hold at least four entries.
    pub fn from_theta(theta: ArrayView1<f64>) -> Self {
        Self {
            omega: theta[OMEGA_IDX],
            alpha: theta[ALPHA_IDX],
            beta: theta[BETA_IDX],
            gamma: theta[GAMMA_IDX],
        }
    }

    /// Shock loading `α + γ·1[r<0]` for the previous return `r`.
    #[inline]
    fn shock_loading(&self, r: f64) -> f64 {
        if r < 0.0 { self.alpha + self.gamma } else { self.alpha }
    }
}

/// Allocate and fill the conditional variance path.
pub fn conditional_variances(
    coeffs: &RecursionCoefficients, returns: ArrayView1<f64>, guards: &VarianceGuards,
) -> Array1<f64> {
    let mut out = Array1::zeros(returns.len());
    compute_variances_into(coeffs, returns, guards, &mut out);
    out
}

/// Fill `out` with the conditional variance path.
///
/// `out` must have the same length as `returns`; an empty input leaves it
/// untouched.
pub fn compute_variances_into(
    coeffs: &RecursionCoefficients, returns: ArrayView1<f64>, guards: &VarianceGuards,
    out: &mut Array1<f64>,
) {
    if returns.is_empty() {
        return;
    }
    let r0 = returns[0];
    let r0_sq = r0 * r0;
    out[0] = guards.clamp(coeffs.omega + (coeffs.shock_loading(r0) + coeffs.beta) * r0_sq);
    for t in 1..returns.len() {
        let r_prev = returns[t - 1];
        let raw =
            coeffs.omega + coeffs.shock_loading(r_prev) * r_prev * r_prev + coeffs.beta * out[t - 1];
        out[t] = guards.clamp(raw);
    }
}

/// Sensitivities `∂σ²ₜ/∂(ω, α, β, γ)` as an `n × 4` matrix.
///
/// `variances` must be the path produced by [`compute_variances_into`] for the
/// same inputs. Rows where the clamp was active are zero and restart the
/// chain.
pub fn variance_sensitivities(
    coeffs: &RecursionCoefficients, returns: ArrayView1<f64>, variances: ArrayView1<f64>,
    guards: &VarianceGuards,
) -> Array2<f64> {
    let n = returns.len();
    let mut sens = Array2::zeros((n, N_RECURSION_PARAMS));
    if n == 0 {
        return sens;
    }
    let r0 = returns[0];
    let r0_sq = r0 * r0;
    if guards.is_interior(variances[0]) {
        let neg0 = if r0 < 0.0 { 1.0 } else { 0.0 };
        sens[[0, OMEGA_IDX]] = 1.0;
        sens[[0, ALPHA_IDX]] = r0_sq;
        sens[[0, BETA_IDX]] = r0_sq;
        sens[[0, GAMMA_IDX]] = neg0 * r0_sq;
    }
    for t in 1..n {
        if !guards.is_interior(variances[t]) {
            continue;
        }
        let r_prev = returns[t - 1];
        let r_prev_sq = r_prev * r_prev;
        let neg = if r_prev < 0.0 { 1.0 } else { 0.0 };
        let direct = [1.0, r_prev_sq, variances[t - 1], neg * r_prev_sq];
        for (j, d) in direct.iter().enumerate() {
            sens[[t, j]] = d + coeffs.beta * sens[[t - 1, j]];
        }
    }
    sens
}
