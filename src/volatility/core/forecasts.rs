//! Out-of-sample variance forecasts for GJR-GARCH(1,1).
//!
//! Purpose
//! -------
//! Roll the variance recursion past the end of the sample using expected
//! squared shocks.
//!
//! Key behaviors
//! -------------
//! - One step ahead, the last return is known:
//!   `σ̂²_{T+1} = ω + (α + γ·1[r_T<0])·r_T² + β·σ²_T`.
//! - Further out, `E[r²] = σ²` and a negative shock has probability 1/2:
//!   `σ̂²_{T+h} = ω + (α + γ/2 + β)·σ̂²_{T+h−1}` for `h ≥ 2`.
//! - Every forecast is clamped by the fit's [`VarianceGuards`].
//!
//! Invariants & assumptions
//! ------------------------
//! - For a stationary parameter set the path converges geometrically to
//!   `ω / (1 − α − β − γ/2)`.
//! - `forecast[i]` holds the `(i + 1)`-step-ahead variance.
use crate::volatility::{
    core::{guards::VarianceGuards, params::GjrGarchParams},
    errors::{GarchError, GarchResult},
};
use ndarray::Array1;

/// Variance forecasts for horizons `1..=horizon`.
///
/// Parameters
/// ----------
/// - `params`: fitted coefficients.
/// - `last_return`: `r_T`, the final in-sample return.
/// - `last_variance`: `σ²_T`, the final in-sample conditional variance.
/// - `horizon`: number of steps, at least 1.
///
/// Errors
/// ------
/// - `GarchError::InvalidHorizon` when `horizon == 0`.
pub fn forecast_variance(
    params: &GjrGarchParams, last_return: f64, last_variance: f64, horizon: usize,
    guards: &VarianceGuards,
) -> GarchResult<Array1<f64>> {
    if horizon == 0 {
        return Err(GarchError::InvalidHorizon { horizon });
    }
    let mut out = Array1::zeros(horizon);
    let leverage = if last_return < 0.0 { params.gamma } else { 0.0 };
    out[0] = guards.clamp(
        params.omega
            + (params.alpha + leverage) * last_return * last_return
            + params.beta * last_variance,
    );
    let persistence = params.persistence();
    for h in 1..horizon {
        out[h] = guards.clamp(params.omega + persistence * out[h - 1]);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The one-step formula with and without the leverage term.
    // - Multi-step decay toward the unconditional variance.
    // - Horizon validation.
    // -------------------------------------------------------------------------

    fn params() -> GjrGarchParams {
        GjrGarchParams::from_theta(array![1e-5, 0.05, 0.85, 0.1, 0.0].view()).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // The first step uses the sign of the last return.
    //
    // Given
    // -----
    // - r_T = ±0.02, σ²_T = 4e-4.
    //
    // Expect
    // ------
    // - Positive: 1e-5 + 0.05·4e-4 + 0.85·4e-4 = 3.7e-4.
    // - Negative: adds 0.1·4e-4 = 4e-5.
    fn one_step_forecast_uses_leverage() {
        // Arrange
        let p = params();
        let guards = VarianceGuards::default();

        // Act
        let up = forecast_variance(&p, 0.02, 4e-4, 1, &guards).unwrap();
        let down = forecast_variance(&p, -0.02, 4e-4, 1, &guards).unwrap();

        // Assert
        assert!((up[0] - 3.7e-4).abs() < 1e-15);
        assert!((down[0] - 4.1e-4).abs() < 1e-15);
    }

    #[test]
    // Purpose
    // -------
    // Long horizons converge to ω / (1 − persistence).
    fn forecasts_converge_to_unconditional_variance() {
        // Arrange
        let p = params();
        let target = p.unconditional_variance().unwrap();

        // Act
        let path = forecast_variance(&p, -0.05, 1e-3, 2000, &VarianceGuards::default()).unwrap();

        // Assert
        assert_eq!(path.len(), 2000);
        assert!((path[1999] - target).abs() < 1e-12 * target.max(1.0));
        let gaps: Vec<f64> = path.iter().map(|v| (v - target).abs()).collect();
        assert!(gaps.windows(2).all(|w| w[1] <= w[0] + 1e-18));
    }

    #[test]
    // Purpose
    // -------
    // Zero horizon is an error.
    fn zero_horizon_is_rejected() {
        assert_eq!(
            forecast_variance(&params(), 0.0, 1e-4, 0, &VarianceGuards::default()),
            Err(GarchError::InvalidHorizon { horizon: 0 })
        );
    }
}
