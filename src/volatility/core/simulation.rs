//! Seeded simulation of GJR-GARCH(1,1) return paths.
//!
//! Purpose
//! -------
//! Draw synthetic returns from known parameters, for Monte Carlo studies and
//! for recovery tests of the fitter.
//!
//! Key behaviors
//! -------------
//! - `rₜ = μ + σₜ·zₜ + Jₜ`, `zₜ ~ N(0, 1)`. For the Gaussian model `Jₜ = 0`;
//!   for the jump mixture `Jₜ = κ·√Nₜ·z'ₜ` with `Nₜ ~ Poisson(λ)`, i.e. the
//!   sum of `Nₜ` independent `N(0, κ²)` jumps.
//! - `σ²ₜ` follows the same step as the likelihood recursion, driven by the
//!   simulated returns and clamped by the default [`VarianceGuards`].
//! - A burn-in prefix is drawn and discarded.
//!
//! Invariants & assumptions
//! ------------------------
//! - Identical `(params, distribution, n, opts)` with `Some(seed)` give
//!   bit-identical paths.
//! - The jump count is not truncated; truncation only enters the density.
use crate::volatility::{
    core::{
        distributions::Distribution,
        guards::VarianceGuards,
        options::SimOpts,
        params::{GjrGarchParams, MIXTURE_N_PARAMS, NORMAL_N_PARAMS},
    },
    errors::{GarchError, GarchResult, ParamError},
};
use ndarray::Array1;
use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution as _, Poisson, StandardNormal};

/// Simulated returns and the conditional variances that generated them.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedPath {
    pub returns: Array1<f64>,
    pub variances: Array1<f64>,
}

/// Simulate `n` returns after `opts.burn_in` discarded draws.
///
/// Errors
/// ------
/// - `GarchError::InvalidSimulationLength` when `n == 0`.
/// - `GarchError::NotImplemented` for the generalized hyperbolic law.
/// - `GarchError::Param(ThetaLengthMismatch)` when `params.jumps` does not
///   match `distribution`.
/// - `GarchError::InvalidInitialVariance` for a non-positive starting
///   variance.
pub fn simulate(
    params: &GjrGarchParams, distribution: Distribution, n: usize, opts: &SimOpts,
) -> GarchResult<SimulatedPath> {
    if n == 0 {
        return Err(GarchError::InvalidSimulationLength { n });
    }
    let jumps = match (distribution, params.jumps) {
        (Distribution::Normal, None) => None,
        (Distribution::NormalPoissonMixture, Some(jumps)) => Some(jumps),
        (Distribution::Normal, Some(_)) => {
            return Err(ParamError::ThetaLengthMismatch {
                expected: NORMAL_N_PARAMS,
                actual: MIXTURE_N_PARAMS,
            }
            .into());
        }
        (Distribution::NormalPoissonMixture, None) => {
            return Err(ParamError::ThetaLengthMismatch {
                expected: MIXTURE_N_PARAMS,
                actual: NORMAL_N_PARAMS,
            }
            .into());
        }
        (Distribution::GeneralizedHyperbolic, _) => {
            return Err(GarchError::NotImplemented { distribution: distribution.name() });
        }
    };
    let jump_law = match jumps {
        Some(j) if j.lambda > 0.0 && j.kappa > 0.0 => Some((
            j.kappa,
            Poisson::new(j.lambda).map_err(|_| GarchError::InvalidPoissonParam)?,
        )),
        _ => None,
    };

    let guards = VarianceGuards::default();
    let sigma2_start = match opts.initial_variance {
        Some(v) if v.is_finite() && v > 0.0 => v,
        Some(value) => return Err(GarchError::InvalidInitialVariance { value }),
        None => params.unconditional_variance().unwrap_or(params.omega),
    };
    let mut sigma2 = guards.clamp(sigma2_start);

    let mut rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let total = opts.burn_in + n;
    let mut returns = Array1::zeros(n);
    let mut variances = Array1::zeros(n);
    let mut r_prev = 0.0;
    for t in 0..total {
        if t > 0 {
            let leverage = if r_prev < 0.0 { params.gamma } else { 0.0 };
            sigma2 = guards.clamp(
                params.omega + (params.alpha + leverage) * r_prev * r_prev + params.beta * sigma2,
            );
        }
        let z: f64 = StandardNormal.sample(&mut rng);
        let mut r = params.mu + sigma2.sqrt() * z;
        if let Some((kappa, poisson)) = &jump_law {
            let count: f64 = poisson.sample(&mut rng);
            if count > 0.0 {
                let z_jump: f64 = StandardNormal.sample(&mut rng);
                r += kappa * count.sqrt() * z_jump;
            }
        }
        if t >= opts.burn_in {
            returns[t - opts.burn_in] = r;
            variances[t - opts.burn_in] = sigma2;
        }
        r_prev = r;
    }
    Ok(SimulatedPath { returns, variances })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Seed determinism and output shapes.
    // - Sample moments of a long Gaussian path.
    // - Layout checks between parameters and distribution.
    // -------------------------------------------------------------------------

    fn normal_params() -> GjrGarchParams {
        GjrGarchParams::from_theta(array![1e-5, 0.05, 0.85, 0.1, 0.0].view()).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Same seed, same path; different seed, different path.
    fn simulation_is_seed_deterministic() {
        // Arrange
        let p = normal_params();
        let opts = SimOpts::new(Some(7), 100, None);

        // Act
        let a = simulate(&p, Distribution::Normal, 250, &opts).unwrap();
        let b = simulate(&p, Distribution::Normal, 250, &opts).unwrap();
        let c = simulate(&p, Distribution::Normal, 250, &SimOpts::new(Some(8), 100, None)).unwrap();

        // Assert
        assert_eq!(a, b);
        assert_ne!(a.returns, c.returns);
        assert_eq!(a.returns.len(), 250);
        assert!(a.variances.iter().all(|&v| v > 0.0 && v.is_finite()));
    }

    #[test]
    // Purpose
    // -------
    // A long path has sample variance near the unconditional variance.
    //
    // Given
    // -----
    // - ω = 1e-5, persistence 0.95 → unconditional variance 2e-4.
    // - 20 000 draws after 1 000 burn-in.
    //
    // Expect
    // ------
    // - Sample variance within 25% of 2e-4 (volatility clustering makes the
    //   estimator noisy).
    fn long_path_matches_unconditional_variance() {
        // Arrange
        let p = normal_params();
        let opts = SimOpts::new(Some(2024), 1000, None);

        // Act
        let path = simulate(&p, Distribution::Normal, 20_000, &opts).unwrap();

        // Assert
        let mean = path.returns.mean().unwrap();
        let var = path.returns.mapv(|r| (r - mean) * (r - mean)).mean().unwrap();
        assert!((var / 2e-4 - 1.0).abs() < 0.25, "sample variance = {var}");
    }

    #[test]
    // Purpose
    // -------
    // Jump draws fatten the tails relative to the Gaussian path.
    fn jump_mixture_has_heavier_tails() {
        // Arrange
        let normal = normal_params();
        let mixture =
            GjrGarchParams::from_theta(array![1e-5, 0.05, 0.85, 0.1, 0.0, 0.03, 0.2].view())
                .unwrap();
        let opts = SimOpts::new(Some(11), 500, None);

        // Act
        let a = simulate(&normal, Distribution::Normal, 10_000, &opts).unwrap();
        let b = simulate(&mixture, Distribution::NormalPoissonMixture, 10_000, &opts).unwrap();

        // Assert
        let max_abs = |x: &Array1<f64>| x.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        assert!(max_abs(&b.returns) > max_abs(&a.returns));
    }

    #[test]
    // Purpose
    // -------
    // Layout mismatches, zero length, and bad starting variances are errors.
    fn invalid_requests_are_rejected() {
        let p = normal_params();
        let opts = SimOpts::default();
        assert!(matches!(
            simulate(&p, Distribution::NormalPoissonMixture, 10, &opts),
            Err(GarchError::Param(ParamError::ThetaLengthMismatch { .. }))
        ));
        assert!(matches!(
            simulate(&p, Distribution::GeneralizedHyperbolic, 10, &opts),
            Err(GarchError::NotImplemented { .. })
        ));
        assert_eq!(
            simulate(&p, Distribution::Normal, 0, &opts),
            Err(GarchError::InvalidSimulationLength { n: 0 })
        );
        assert!(matches!(
            simulate(&p, Distribution::Normal, 10, &SimOpts::new(Some(1), 0, Some(-1.0))),
            Err(GarchError::InvalidInitialVariance { .. })
        ));
    }
}
