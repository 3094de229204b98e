//! Initial parameter guesses for GJR-GARCH fits.
//!
//! Purpose
//! -------
//! Decide where the optimizer starts. By default the start is a fixed set of
//! priors that sit inside the admissible region for typical daily log
//! returns; callers that already know a good point (e.g. a previous fit) can
//! pass it through [`Init::Fixed`].
//!
//! Key behaviors
//! -------------
//! - [`Init::Priors`]: `ω = 0.001`, `α = 0.05`, `β = 0.80`, `γ = 0.02`,
//!   `μ = mean(r)`, and for the jump mixture `κ = 0.05`, `λ = 0.5`.
//! - [`Init::Fixed`]: user-supplied vector, checked for length and
//!   finiteness against the distribution. Feasibility is *not* required;
//!   the penalty handles infeasible starts.
//!
//! Invariants & assumptions
//! ------------------------
//! - The prior `α + β + γ/2 = 0.86 < 1`, so the default start is strictly
//!   feasible.
use crate::volatility::{
    core::{data::ReturnSeries, distributions::Distribution},
    errors::{GarchError, GarchResult},
};
use ndarray::Array1;

pub const OMEGA_PRIOR: f64 = 0.001;
pub const ALPHA_PRIOR: f64 = 0.05;
pub const BETA_PRIOR: f64 = 0.80;
pub const GAMMA_PRIOR: f64 = 0.02;
pub const KAPPA_PRIOR: f64 = 0.05;
pub const LAMBDA_PRIOR: f64 = 0.5;

/// Starting-point policy for the optimizer.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Init {
    /// Built-in priors with `μ` set to the sample mean.
    #[default]
    Priors,
    /// Explicit starting vector in the distribution's layout.
    Fixed(Array1<f64>),
}

impl Init {
    /// Checked constructor for [`Init::Fixed`].
    ///
    /// Errors
    /// ------
    /// - `GarchError::InvalidInitValue` for the first non-finite entry.
    ///
    /// The length is checked later against the distribution by
    /// [`initial_theta`].
    pub fn fixed(theta: Array1<f64>) -> GarchResult<Self> {
        validate_finite(&theta)?;
        Ok(Init::Fixed(theta))
    }
}

/// Resolve the starting vector for `distribution` on `returns`.
///
/// Errors
/// ------
/// - `GarchError::NotImplemented` for distributions without a likelihood.
/// - `GarchError::InvalidInitLength` / `InvalidInitValue` for a bad
///   [`Init::Fixed`] vector.
pub fn initial_theta(
    init: &Init, distribution: Distribution, returns: &ReturnSeries,
) -> GarchResult<Array1<f64>> {
    let n_params = distribution.n_params()?;
    match init {
        Init::Priors => {
            let mut theta =
                vec![OMEGA_PRIOR, ALPHA_PRIOR, BETA_PRIOR, GAMMA_PRIOR, returns.mean()];
            if distribution == Distribution::NormalPoissonMixture {
                theta.extend([KAPPA_PRIOR, LAMBDA_PRIOR]);
            }
            Ok(Array1::from(theta))
        }
        Init::Fixed(theta) => {
            if theta.len() != n_params {
                return Err(GarchError::InvalidInitLength {
                    expected: n_params,
                    actual: theta.len(),
                });
            }
            validate_finite(theta)?;
            Ok(theta.clone())
        }
    }
}

fn validate_finite(theta: &Array1<f64>) -> GarchResult<()> {
    match theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, &value)) => Err(GarchError::InvalidInitValue { index, value }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Prior vectors for both implemented layouts.
    // - Validation of fixed starting vectors.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Priors use the documented constants and the sample mean.
    fn priors_follow_layout() {
        // Arrange
        let returns = ReturnSeries::from_slice(&[0.01, -0.02, 0.04]).unwrap();

        // Act
        let normal = initial_theta(&Init::Priors, Distribution::Normal, &returns).unwrap();
        let mixture =
            initial_theta(&Init::Priors, Distribution::NormalPoissonMixture, &returns).unwrap();

        // Assert
        assert_eq!(normal.len(), 5);
        assert_eq!(normal.slice(ndarray::s![..4]), array![0.001, 0.05, 0.80, 0.02]);
        assert!((normal[4] - 0.01).abs() < 1e-15);
        assert_eq!(mixture.len(), 7);
        assert_eq!(mixture[5], KAPPA_PRIOR);
        assert_eq!(mixture[6], LAMBDA_PRIOR);
    }

    #[test]
    // Purpose
    // -------
    // A fixed vector must match the distribution and be finite.
    fn fixed_vector_is_validated() {
        // Arrange
        let returns = ReturnSeries::from_slice(&[0.01, -0.02]).unwrap();
        let good = Init::fixed(array![1e-5, 0.1, 0.8, 0.05, 0.0]).unwrap();
        let wrong_len = Init::fixed(array![1e-5, 0.1]).unwrap();

        // Act / Assert
        assert!(initial_theta(&good, Distribution::Normal, &returns).is_ok());
        assert_eq!(
            initial_theta(&good, Distribution::NormalPoissonMixture, &returns),
            Err(GarchError::InvalidInitLength { expected: 7, actual: 5 })
        );
        assert!(matches!(
            initial_theta(&wrong_len, Distribution::Normal, &returns),
            Err(GarchError::InvalidInitLength { .. })
        ));
        assert!(matches!(
            Init::fixed(array![1e-5, f64::INFINITY]),
            Err(GarchError::InvalidInitValue { index: 1, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // The generalized hyperbolic layout is not defined.
    fn generalized_hyperbolic_has_no_start() {
        let returns = ReturnSeries::from_slice(&[0.01, -0.02]).unwrap();
        assert!(matches!(
            initial_theta(&Init::Priors, Distribution::GeneralizedHyperbolic, &returns),
            Err(GarchError::NotImplemented { .. })
        ));
    }
}
