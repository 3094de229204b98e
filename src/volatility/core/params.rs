//! GJR-GARCH parameter layout and validated parameter view.
//!
//! Purpose
//! -------
//! Fix the position of every coefficient inside the raw parameter vector the
//! optimizer works on, and provide [`GjrGarchParams`], a typed and validated
//! view used after a fit (forecasting, simulation, display).
//!
//! Conventions
//! -----------
//! - Gaussian layout: `θ = (ω, α, β, γ, μ)`.
//! - Jump-mixture layout: `θ = (ω, α, β, γ, μ, κ, λ)`.
//! - Validity mirrors the fitter's constraint set: `ω ≥ 0`, `β ≥ 0`,
//!   `α + γ ≥ 0`, `α + β + γ/2 ≤ 1`, and `κ, λ ≥ 0` when present. A `slack`
//!   argument tolerates the small residual violations a penalty method leaves.
//!
//! Downstream usage
//! ----------------
//! - The likelihoods and constraint set index raw vectors through the
//!   `*_IDX` constants.
//! - `FitResult::params` builds a [`GjrGarchParams`] with the fit's
//!   feasibility tolerance as slack.
use crate::volatility::errors::{ParamError, ParamResult};
use ndarray::{Array1, ArrayView1};

pub const OMEGA_IDX: usize = 0;
pub const ALPHA_IDX: usize = 1;
pub const BETA_IDX: usize = 2;
pub const GAMMA_IDX: usize = 3;
pub const MU_IDX: usize = 4;
pub const KAPPA_IDX: usize = 5;
pub const LAMBDA_IDX: usize = 6;

/// Number of parameters of the Gaussian model.
pub const NORMAL_N_PARAMS: usize = 5;

/// Number of parameters of the Gaussian–Poisson jump mixture.
pub const MIXTURE_N_PARAMS: usize = 7;

/// Jump component of the mixture: jumps are `N(0, κ²)` arriving at Poisson rate `λ`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpParams {
    pub kappa: f64,
    pub lambda: f64,
}

/// Validated GJR-GARCH(1,1) coefficients.
///
/// Fields
/// ------
/// - `omega`, `alpha`, `beta`, `gamma`: variance recursion coefficients.
/// - `mu`: mean return.
/// - `jumps`: `Some` for the jump mixture, `None` for the Gaussian model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GjrGarchParams {
    pub omega: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub mu: f64,
    pub jumps: Option<JumpParams>,
}

impl GjrGarchParams {
    /// Build from a raw vector with no tolerance on the constraints.
    ///
    /// Errors
    /// ------
    /// See [`GjrGarchParams::from_theta_with_slack`].
    pub fn from_theta(theta: ArrayView1<f64>) -> ParamResult<Self> {
        Self::from_theta_with_slack(theta, 0.0)
    }

    /// Build from a raw vector of length 5 or 7, allowing each constraint to
    /// be violated by at most `slack`.
    ///
    /// Errors
    /// ------
    /// - `ParamError::ThetaLengthMismatch` for any other length.
    /// - `ParamError::NonFiniteParam` for the first NaN/±inf entry.
    /// - `InvalidOmega`, `InvalidBeta`, `InvalidAsymmetry`,
    ///   `StationarityViolated`, `InvalidKappa`, `InvalidLambda` when a
    ///   constraint is violated by more than `slack`.
    pub fn from_theta_with_slack(theta: ArrayView1<f64>, slack: f64) -> ParamResult<Self> {
        let jumps_present = match theta.len() {
            NORMAL_N_PARAMS => false,
            MIXTURE_N_PARAMS => true,
            actual => {
                let expected =
                    if actual > NORMAL_N_PARAMS { MIXTURE_N_PARAMS } else { NORMAL_N_PARAMS };
                return Err(ParamError::ThetaLengthMismatch { expected, actual });
            }
        };
        if let Some((index, &value)) = theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ParamError::NonFiniteParam { index, value });
        }
        let params = Self {
            omega: theta[OMEGA_IDX],
            alpha: theta[ALPHA_IDX],
            beta: theta[BETA_IDX],
            gamma: theta[GAMMA_IDX],
            mu: theta[MU_IDX],
            jumps: jumps_present
                .then(|| JumpParams { kappa: theta[KAPPA_IDX], lambda: theta[LAMBDA_IDX] }),
        };
        params.validate(slack)?;
        Ok(params)
    }

    fn validate(&self, slack: f64) -> ParamResult<()> {
        if self.omega < -slack {
            return Err(ParamError::InvalidOmega { value: self.omega });
        }
        if self.beta < -slack {
            return Err(ParamError::InvalidBeta { value: self.beta });
        }
        if self.alpha + self.gamma < -slack {
            return Err(ParamError::InvalidAsymmetry { alpha: self.alpha, gamma: self.gamma });
        }
        let persistence = self.persistence();
        if persistence > 1.0 + slack {
            return Err(ParamError::StationarityViolated { persistence });
        }
        if let Some(jumps) = self.jumps {
            if jumps.kappa < -slack {
                return Err(ParamError::InvalidKappa { value: jumps.kappa });
            }
            if jumps.lambda < -slack {
                return Err(ParamError::InvalidLambda { value: jumps.lambda });
            }
        }
        Ok(())
    }

    /// `α + β + γ/2`, the decay rate of variance forecasts under symmetric shocks.
    pub fn persistence(&self) -> f64 {
        self.alpha + self.beta + 0.5 * self.gamma
    }

    /// `ω / (1 − persistence)` when the process is covariance stationary.
    pub fn unconditional_variance(&self) -> Option<f64> {
        let persistence = self.persistence();
        (persistence < 1.0).then(|| self.omega / (1.0 - persistence))
    }

    /// Raw vector in the layout matching `jumps`.
    pub fn to_theta(&self) -> Array1<f64> {
        let mut theta = vec![self.omega, self.alpha, self.beta, self.gamma, self.mu];
        if let Some(jumps) = self.jumps {
            theta.push(jumps.kappa);
            theta.push(jumps.lambda);
        }
        Array1::from(theta)
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
    // - Layout detection from the vector length.
    // - Constraint validation with and without slack.
    // - Derived quantities (persistence, unconditional variance).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Length selects the layout and `to_theta` restores the input.
    fn from_theta_detects_layout() {
        // Arrange
        let normal = array![1e-5, 0.05, 0.85, 0.1, 0.0005];
        let mixture = array![1e-5, 0.05, 0.85, 0.1, 0.0005, 0.02, 0.3];

        // Act
        let p_normal = GjrGarchParams::from_theta(normal.view()).unwrap();
        let p_mixture = GjrGarchParams::from_theta(mixture.view()).unwrap();

        // Assert
        assert!(p_normal.jumps.is_none());
        assert_eq!(p_mixture.jumps, Some(JumpParams { kappa: 0.02, lambda: 0.3 }));
        assert_eq!(p_mixture.to_theta(), mixture);
    }

    #[test]
    // Purpose
    // -------
    // Unsupported lengths report the nearest valid layout.
    fn from_theta_rejects_other_lengths() {
        assert_eq!(
            GjrGarchParams::from_theta(array![0.1, 0.1, 0.1, 0.1].view()),
            Err(ParamError::ThetaLengthMismatch { expected: 5, actual: 4 })
        );
        assert_eq!(
            GjrGarchParams::from_theta(array![0.1, 0.1, 0.1, 0.1, 0.1, 0.1].view()),
            Err(ParamError::ThetaLengthMismatch { expected: 7, actual: 6 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Constraint violations are caught; slack admits tiny violations only.
    //
    // Given
    // -----
    // - Persistence 1 + 1e-9 and ω = -1e-9.
    //
    // Expect
    // ------
    // - Rejected without slack, accepted with slack 1e-6.
    fn validation_honors_slack() {
        // Arrange
        let explosive = array![1e-5, 0.1, 0.9 + 1e-9, 0.0, 0.0];
        let negative_omega = array![-1e-9, 0.05, 0.9, 0.0, 0.0];

        // Act / Assert
        assert!(matches!(
            GjrGarchParams::from_theta(explosive.view()),
            Err(ParamError::StationarityViolated { .. })
        ));
        assert!(matches!(
            GjrGarchParams::from_theta(negative_omega.view()),
            Err(ParamError::InvalidOmega { .. })
        ));
        assert!(GjrGarchParams::from_theta_with_slack(explosive.view(), 1e-6).is_ok());
        assert!(GjrGarchParams::from_theta_with_slack(negative_omega.view(), 1e-6).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Negative γ is allowed as long as α + γ ≥ 0.
    fn asymmetry_constraint_uses_alpha_plus_gamma() {
        assert!(GjrGarchParams::from_theta(array![1e-5, 0.1, 0.8, -0.05, 0.0].view()).is_ok());
        assert!(matches!(
            GjrGarchParams::from_theta(array![1e-5, 0.1, 0.8, -0.2, 0.0].view()),
            Err(ParamError::InvalidAsymmetry { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Unconditional variance is ω / (1 − α − β − γ/2).
    fn unconditional_variance_matches_formula() {
        // Arrange
        let p = GjrGarchParams::from_theta(array![1e-5, 0.05, 0.85, 0.1, 0.0].view()).unwrap();

        // Act
        let v = p.unconditional_variance().unwrap();

        // Assert
        assert!((p.persistence() - 0.95).abs() < 1e-15);
        assert!((v - 2e-4).abs() < 1e-15);
    }
}
