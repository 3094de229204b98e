//! rust_volatility — GJR-GARCH(1,1) volatility estimation with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the volatility fitter to Python via the `_rust_volatility`
//! extension module.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`volatility`, `optimization`,
//!   `inference`) as the public crate surface.
//! - With `python-bindings`, define the `GarchFit` class and the `fit`
//!   function, registered under the `rust_volatility.volatility_models`
//!   submodule.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, input conversion, and error mapping.
//! - Errors from core Rust code are converted to `ValueError` at the PyO3
//!   boundary.
//!
//! Downstream usage
//! ----------------
//! - Rust code should depend on `volatility::prelude` and ignore the items
//!   guarded by `python-bindings`.
//! - Python code calls `rust_volatility.volatility_models.fit(returns,
//!   model="normal")` and reads the fitted values from the returned
//!   `GarchFit`.
pub mod inference;
pub mod optimization;
pub mod utils;
pub mod volatility;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    utils::{build_garch_options, extract_returns},
    volatility::{
        core::distributions::Distribution,
        models::gjr_garch::{FitResult, GjrGarchModel},
    },
};

/// GarchFit — Python-facing view of a fitted GJR-GARCH model.
///
/// Getters mirror [`FitResult`] and its diagnostics; methods that need the
/// data (`volatility_path`, `forecast_variance`, `standard_errors`) take the
/// same returns that were fitted.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_volatility.volatility_models")]
pub struct GarchFit {
    pub inner: FitResult,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl GarchFit {
    #[getter]
    pub fn distribution(&self) -> &'static str {
        self.inner.distribution.name()
    }

    #[getter]
    pub fn theta(&self) -> Vec<f64> {
        self.inner.theta.to_vec()
    }

    #[getter]
    pub fn converged(&self) -> bool {
        self.inner.converged
    }

    #[getter]
    pub fn nll(&self) -> f64 {
        self.inner.nll
    }

    #[getter]
    pub fn status(&self) -> String {
        self.inner.diagnostics.status.clone()
    }

    #[getter]
    pub fn solver(&self) -> String {
        self.inner.diagnostics.solver.clone()
    }

    #[getter]
    pub fn iterations(&self) -> usize {
        self.inner.diagnostics.iterations
    }

    #[getter]
    pub fn penalty_rounds(&self) -> usize {
        self.inner.diagnostics.penalty_rounds
    }

    #[getter]
    pub fn max_violation(&self) -> f64 {
        self.inner.diagnostics.max_violation
    }

    #[getter]
    pub fn grad_norm(&self) -> Option<f64> {
        self.inner.diagnostics.grad_norm
    }

    #[getter]
    pub fn fn_evals(&self) -> Vec<(String, u64)> {
        self.inner.diagnostics.fn_evals.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[pyo3(signature = (returns), text_signature = "(self, returns, /)")]
    pub fn volatility_path<'py>(
        &self, py: Python<'py>, returns: &Bound<'py, PyAny>,
    ) -> PyResult<Vec<f64>> {
        let series = extract_returns(py, returns)?;
        Ok(self.inner.volatility_path(&series).to_vec())
    }

    #[pyo3(signature = (returns, horizon), text_signature = "(self, returns, horizon, /)")]
    pub fn forecast_variance<'py>(
        &self, py: Python<'py>, returns: &Bound<'py, PyAny>, horizon: usize,
    ) -> PyResult<Vec<f64>> {
        let series = extract_returns(py, returns)?;
        Ok(self.inner.forecast_variance(&series, horizon)?.to_vec())
    }

    #[pyo3(signature = (returns), text_signature = "(self, returns, /)")]
    pub fn standard_errors<'py>(
        &self, py: Python<'py>, returns: &Bound<'py, PyAny>,
    ) -> PyResult<Vec<f64>> {
        let series = extract_returns(py, returns)?;
        Ok(self.inner.standard_errors(&series)?.to_vec())
    }
}

/// Fit a GJR-GARCH(1,1) model to `returns`.
///
/// `model` is one of `"normal"`, `"normal poisson mixture"`, or
/// `"generalized hyperbolic"` (the last raises `ValueError`).
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "fit")]
#[pyo3(
    signature = (
        returns,
        model = "normal",
        init_theta = None,
        tol_grad = None,
        tol_cost = None,
        max_iter = None,
        line_searcher = None,
        lbfgs_mem = None,
        variance_guards = None,
        penalty = None,
        feasibility_tol = None,
    ),
    text_signature = "(returns, /, model='normal', init_theta=None, tol_grad=None, \
                      tol_cost=None, max_iter=None, line_searcher=None, lbfgs_mem=None, \
                      variance_guards=None, penalty=None, feasibility_tol=None)"
)]
#[allow(clippy::too_many_arguments)]
fn fit_py<'py>(
    py: Python<'py>, returns: &Bound<'py, PyAny>, model: &str,
    init_theta: Option<&Bound<'py, PyAny>>, tol_grad: Option<f64>, tol_cost: Option<f64>,
    max_iter: Option<usize>, line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
    variance_guards: Option<(f64, f64)>, penalty: Option<(f64, f64, usize)>,
    feasibility_tol: Option<f64>,
) -> PyResult<GarchFit> {
    let distribution: Distribution = model.parse()?;
    let series = extract_returns(py, returns)?;
    let options = build_garch_options(
        py,
        init_theta,
        tol_grad,
        tol_cost,
        max_iter,
        line_searcher,
        lbfgs_mem,
        variance_guards,
        penalty,
        feasibility_tol,
    )?;
    let inner = GjrGarchModel::new(distribution, options).fit(&series)?;
    Ok(GarchFit { inner })
}

/// Module initializer for `_rust_volatility`.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_volatility<'py>(py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let volatility_models_mod = PyModule::new(py, "volatility_models")?;
    volatility_models(py, m, &volatility_models_mod)?;

    // Register the submodule in sys.modules so dotted imports work.
    py.import("sys")?
        .getattr("modules")?
        .set_item("rust_volatility.volatility_models", volatility_models_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn volatility_models<'py>(
    _py: Python, rust_volatility: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<GarchFit>()?;
    m.add_function(wrap_pyfunction!(fit_py, m)?)?;
    rust_volatility.add_submodule(m)?;
    Ok(())
}
