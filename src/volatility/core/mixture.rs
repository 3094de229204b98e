//! Gaussian–Poisson jump mixture density.
//!
//! Purpose
//! -------
//! Evaluate the density of a return that is Gaussian with variance `σ²` plus
//! a Poisson(λ) number of i.i.d. `N(0, κ²)` jumps:
//!
//! `f(x) = Σₖ wₖ · φ(x; μ, √(σ² + k·κ²))`, `k = 0..=MAX_JUMPS`,
//!
//! where `wₖ` is the Poisson(λ) mass at `k` renormalized over the truncated
//! support.
//!
//! Key behaviors
//! -------------
//! - Works in log space ([`MixtureDensity::log_density`]) with
//!   `safe_log_sum_exp`, so far-tail observations give a finite, very
//!   negative log-density instead of underflowing to `ln 0`.
//! - `λ = 0` or `κ = 0` reduces exactly to the plain Gaussian.
//! - Poisson weights are computed once per `(κ, λ)` and reused across a
//!   whole series.
//!
//! Invariants & assumptions
//! ------------------------
//! - `σ > 0`, `κ ≥ 0`, `λ ≥ 0`, all finite; anything else is
//!   `GarchError::InvalidDensityParam`.
//! - The density is non-negative and integrates to 1.
use crate::{
    optimization::numerical_stability::safe_log_sum_exp,
    volatility::errors::{GarchError, GarchResult},
};
use statrs::distribution::{Continuous, Discrete, Normal, Poisson};

/// Truncation point of the Poisson jump count.
pub const MAX_JUMPS: usize = 10;

/// Density of the jump mixture for fixed `(κ, λ)`.
#[derive(Debug, Clone, PartialEq)]
pub struct MixtureDensity {
    kappa_sq: f64,
    log_weights: [f64; MAX_JUMPS + 1],
}

impl MixtureDensity {
    /// Precompute the renormalized Poisson log-weights.
    ///
    /// Errors
    /// ------
    /// - `GarchError::InvalidDensityParam` for negative or non-finite `kappa`
    ///   or `lambda`.
    pub fn new(kappa: f64, lambda: f64) -> GarchResult<Self> {
        if !kappa.is_finite() || kappa < 0.0 {
            return Err(GarchError::InvalidDensityParam {
                param: "kappa",
                value: kappa,
                reason: "Jump scale must be finite and >= 0.",
            });
        }
        if !lambda.is_finite() || lambda < 0.0 {
            return Err(GarchError::InvalidDensityParam {
                param: "lambda",
                value: lambda,
                reason: "Jump intensity must be finite and >= 0.",
            });
        }
        Ok(Self { kappa_sq: kappa * kappa, log_weights: poisson_log_weights(lambda)? })
    }

    /// `ln f(x; μ, σ, κ, λ)`.
    ///
    /// Errors
    /// ------
    /// - `GarchError::InvalidDensityParam` when `sigma` is not finite and
    ///   positive or `x`/`mu` is non-finite.
    pub fn log_density(&self, x: f64, mu: f64, sigma: f64) -> GarchResult<f64> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(GarchError::InvalidDensityParam {
                param: "sigma",
                value: sigma,
                reason: "Standard deviation must be finite and > 0.",
            });
        }
        if !x.is_finite() || !mu.is_finite() {
            let (param, value) = if x.is_finite() { ("mu", mu) } else { ("x", x) };
            return Err(GarchError::InvalidDensityParam {
                param,
                value,
                reason: "Location and observation must be finite.",
            });
        }
        let sigma_sq = sigma * sigma;
        let mut terms = [f64::NEG_INFINITY; MAX_JUMPS + 1];
        for (k, (term, &log_w)) in terms.iter_mut().zip(self.log_weights.iter()).enumerate() {
            if log_w == f64::NEG_INFINITY {
                continue;
            }
            let sd = (sigma_sq + k as f64 * self.kappa_sq).sqrt();
            *term = log_w + Normal::new(mu, sd)?.ln_pdf(x);
        }
        Ok(safe_log_sum_exp(&terms))
    }

    /// `f(x; μ, σ, κ, λ)`.
    pub fn density(&self, x: f64, mu: f64, sigma: f64) -> GarchResult<f64> {
        Ok(self.log_density(x, mu, sigma)?.exp())
    }
}

/// One-shot mixture density; see [`MixtureDensity`].
pub fn density(x: f64, mu: f64, sigma: f64, kappa: f64, lambda: f64) -> GarchResult<f64> {
    MixtureDensity::new(kappa, lambda)?.density(x, mu, sigma)
}

/// One-shot mixture log-density; see [`MixtureDensity`].
pub fn log_density(x: f64, mu: f64, sigma: f64, kappa: f64, lambda: f64) -> GarchResult<f64> {
    MixtureDensity::new(kappa, lambda)?.log_density(x, mu, sigma)
}

/// Poisson(λ) log-masses on `0..=MAX_JUMPS`, renormalized to sum to one.
fn poisson_log_weights(lambda: f64) -> GarchResult<[f64; MAX_JUMPS + 1]> {
    let mut log_weights = [f64::NEG_INFINITY; MAX_JUMPS + 1];
    if lambda == 0.0 {
        log_weights[0] = 0.0;
        return Ok(log_weights);
    }
    let poisson = Poisson::new(lambda)?;
    for (k, w) in log_weights.iter_mut().enumerate() {
        *w = poisson.ln_pmf(k as u64);
    }
    let log_total = safe_log_sum_exp(&log_weights);
    log_weights.iter_mut().for_each(|w| *w -= log_total);
    Ok(log_weights)
}
