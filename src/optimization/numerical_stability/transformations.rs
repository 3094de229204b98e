//! Numerical stability utilities.
//!
//! # Provided items
//! - [`SCALE_FLOOR`], [`parameter_scale`], [`to_scaled`], [`from_scaled`]:
//!   diagonal rescaling so that parameters spanning several orders of
//!   magnitude (ω ≈ 1e-5 next to β ≈ 0.9) look comparable to the solver.
//! - [`safe_log_sum_exp`]: `ln Σ exp(xᵢ)` without overflow or underflow.
//! - [`EIGEN_EPS`]: relative cutoff for eigenvalues in Hessian pseudo-inverses.
use ndarray::{Array1, ArrayView1};

/// Smallest per-coordinate scale used by [`parameter_scale`].
pub const SCALE_FLOOR: f64 = 1e-4;

/// Eigenvalues whose magnitude is below `EIGEN_EPS · max|λ|` are treated as
/// zero when pseudo-inverting a Hessian.
pub const EIGEN_EPS: f64 = 1e-10;

/// Per-coordinate scale `sᵢ = max(|θ₀ᵢ|, SCALE_FLOOR)`.
pub fn parameter_scale(theta0: ArrayView1<f64>) -> Array1<f64> {
    theta0.mapv(|x| x.abs().max(SCALE_FLOOR))
}

/// Map model coordinates into solver coordinates: `uᵢ = θᵢ / sᵢ`.
pub fn to_scaled(theta: ArrayView1<f64>, scale: ArrayView1<f64>) -> Array1<f64> {
    &theta / &scale
}

/// Map solver coordinates back to model coordinates: `θᵢ = uᵢ · sᵢ`.
pub fn from_scaled(u: ArrayView1<f64>, scale: ArrayView1<f64>) -> Array1<f64> {
    &u * &scale
}

/// Stable `ln Σ exp(xᵢ)` using the max-shift trick.
///
/// Returns `-∞` for an empty slice or when every term is `-∞`.
pub fn safe_log_sum_exp(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    if !max.is_finite() {
        return max;
    }
    max + values.iter().map(|&v| (v - max).exp()).sum::<f64>().ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Scaling floors tiny coordinates and round-trips exactly on powers of two.
    fn parameter_scale_floors_and_round_trips() {
        // Arrange
        let theta0 = array![0.0, -0.5, 2e-6, 4.0];

        // Act
        let scale = parameter_scale(theta0.view());
        let u = to_scaled(theta0.view(), scale.view());
        let back = from_scaled(u.view(), scale.view());

        // Assert
        assert_eq!(scale, array![SCALE_FLOOR, 0.5, SCALE_FLOOR, 4.0]);
        assert_eq!(u[1], -1.0);
        assert_eq!(u[3], 1.0);
        for (a, b) in back.iter().zip(theta0.iter()) {
            assert!((a - b).abs() < 1e-18);
        }
    }

    #[test]
    // Purpose
    // -------
    // log-sum-exp matches the naive formula where that is safe and stays
    // finite where the naive formula overflows or underflows.
    fn safe_log_sum_exp_handles_extremes() {
        // Arrange
        let moderate = [0.1, -1.3, 2.0];
        let huge = [1000.0, 1000.0];
        let tiny = [-1000.0, -1001.0];

        // Act
        let naive: f64 = moderate.iter().map(|x: &f64| x.exp()).sum::<f64>().ln();

        // Assert
        assert!((safe_log_sum_exp(&moderate) - naive).abs() < 1e-12);
        assert!((safe_log_sum_exp(&huge) - (1000.0 + 2f64.ln())).abs() < 1e-9);
        assert!((safe_log_sum_exp(&tiny) - (-1000.0 + (1.0 + (-1f64).exp()).ln())).abs() < 1e-9);
        assert_eq!(safe_log_sum_exp(&[]), f64::NEG_INFINITY);
    }
}
