//! loglik_optimizer::builders — solver construction helpers.
//!
//! Purpose
//! -------
//! Build configured L-BFGS and Nelder–Mead solvers from [`MLEOptions`] so
//! higher-level code never touches Argmin-specific constructors.
//!
//! Key behaviors
//! -------------
//! - L-BFGS with either Hager–Zhang or More–Thuente line search, with
//!   optional gradient and cost-change tolerances applied by
//!   [`configure_lbfgs`].
//! - Nelder–Mead seeded with an axis-aligned initial simplex around the
//!   starting point ([`initial_simplex`]).
//!
//! Conventions
//! -----------
//! - L-BFGS builders do not set `theta0` or `max_iters`; the runner does.
//!   The Nelder–Mead builder needs `theta0` because the simplex *is* the
//!   starting state.
//! - Errors raised by Argmin setters are converted into `OptError`.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        traits::MLEOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, NelderMeadSolver, Theta, ZERO_SIMPLEX_STEP,
        },
    },
};

/// Standard deviation tolerance for Nelder–Mead when no cost tolerance is set.
const DEFAULT_SD_TOLERANCE: f64 = 1e-10;

/// Construct L-BFGS with Hager–Zhang line search.
///
/// Uses `opts.lbfgs_mem` (or [`DEFAULT_LBFGS_MEM`]) and the optional
/// tolerances in `opts.tols`.
///
/// # Errors
/// - `OptError` when Argmin rejects a tolerance.
pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(HagerZhangLS::new(), mem);
    configure_lbfgs(lbfgs, opts)
}

/// Construct L-BFGS with More–Thuente line search.
///
/// # Errors
/// - `OptError` when Argmin rejects a tolerance.
pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(MoreThuenteLS::new(), mem);
    configure_lbfgs(lbfgs, opts)
}

/// Apply the optional gradient and cost-change tolerances to an L-BFGS solver.
///
/// A `None` tolerance leaves Argmin's default in place.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

/// Construct a Nelder–Mead solver whose initial simplex surrounds `theta0`.
///
/// The standard-deviation stopping tolerance is `opts.tols.tol_cost` when
/// present and `1e-10` otherwise.
///
/// # Errors
/// - [`OptError::InvalidSimplexStep`] if `opts.simplex_step` is not finite
///   and positive.
/// - `OptError` when Argmin rejects the tolerance.
pub fn build_nelder_mead(theta0: &Theta, opts: &MLEOptions) -> OptResult<NelderMeadSolver> {
    let vertices = initial_simplex(theta0, opts.simplex_step)?;
    let sd_tol = opts.tols.tol_cost.unwrap_or(DEFAULT_SD_TOLERANCE);
    Ok(NelderMeadSolver::new(vertices).with_sd_tolerance(sd_tol)?)
}

/// Axis-aligned simplex: `theta0` plus one vertex per coordinate.
///
/// Vertex `i` scales coordinate `i` by `1 + step`; zero coordinates are moved
/// to [`ZERO_SIMPLEX_STEP`] instead.
pub fn initial_simplex(theta0: &Theta, step: f64) -> OptResult<Vec<Theta>> {
    if !step.is_finite() || step <= 0.0 {
        return Err(OptError::InvalidSimplexStep {
            step,
            reason: "Simplex step must be finite and positive.",
        });
    }
    let mut vertices = Vec::with_capacity(theta0.len() + 1);
    vertices.push(theta0.clone());
    for i in 0..theta0.len() {
        let mut vertex = theta0.clone();
        vertex[i] = if vertex[i] != 0.0 { (1.0 + step) * vertex[i] } else { ZERO_SIMPLEX_STEP };
        vertices.push(vertex);
    }
    Ok(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::loglik_optimizer::traits::{LineSearcher, MLEOptions, Tolerances};
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction of both L-BFGS variants with default and explicit memory.
    // - Tolerance wiring in `configure_lbfgs`.
    // - Geometry of the Nelder–Mead initial simplex.
    //
    // End-to-end solver runs live with the runner and `api` tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Both line-search variants build with default and explicit memory.
    fn lbfgs_builders_accept_default_and_explicit_memory() {
        // Arrange
        let tols = Tolerances::new(Some(1e-6), Some(1e-8), Some(50)).unwrap();
        let hz = MLEOptions::new(tols, LineSearcher::HagerZhang, None).unwrap();
        let mt = MLEOptions::new(tols, LineSearcher::MoreThuente, Some(11)).unwrap();

        // Act / Assert
        assert!(build_optimizer_hager_zhang(&hz).is_ok());
        assert!(build_optimizer_more_thuente(&mt).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // `configure_lbfgs` succeeds with and without tolerances present.
    fn configure_lbfgs_handles_present_and_absent_tolerances() {
        // Arrange
        let with_tols = MLEOptions::new(
            Tolerances::new(Some(1e-6), Some(1e-8), Some(100)).unwrap(),
            LineSearcher::HagerZhang,
            None,
        )
        .unwrap();
        let without_tols = MLEOptions::new(
            Tolerances::new(None, None, Some(100)).unwrap(),
            LineSearcher::MoreThuente,
            None,
        )
        .unwrap();

        // Act
        let a = configure_lbfgs(LBFGS::new(HagerZhangLS::new(), DEFAULT_LBFGS_MEM), &with_tols);
        let b = configure_lbfgs(LBFGS::new(MoreThuenteLS::new(), DEFAULT_LBFGS_MEM), &without_tols);

        // Assert
        assert!(a.is_ok());
        assert!(b.is_ok());
    }

    #[test]
    // Purpose
    // -------
    // The simplex has n + 1 vertices, perturbs one axis per vertex, and moves
    // zero coordinates by the absolute step.
    //
    // Given
    // -----
    // - θ₀ = (0.2, 0.0), step 0.05.
    //
    // Expect
    // ------
    // - Vertices θ₀, (0.21, 0.0), (0.2, 0.00025).
    fn initial_simplex_perturbs_one_axis_per_vertex() {
        // Arrange
        let theta0 = array![0.2, 0.0];

        // Act
        let vertices = initial_simplex(&theta0, 0.05).unwrap();

        // Assert
        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[0], theta0);
        assert!((vertices[1][0] - 0.21).abs() < 1e-15);
        assert_eq!(vertices[1][1], 0.0);
        assert_eq!(vertices[2][0], 0.2);
        assert_eq!(vertices[2][1], ZERO_SIMPLEX_STEP);
    }

    #[test]
    // Purpose
    // -------
    // A non-positive step is a configuration error.
    fn initial_simplex_rejects_non_positive_step() {
        let err = initial_simplex(&array![1.0], 0.0).unwrap_err();
        assert!(matches!(err, OptError::InvalidSimplexStep { .. }));
    }
}
