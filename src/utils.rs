//! Python-boundary helpers: array extraction and option building.
//!
//! Everything here is compiled only with the `python-bindings` feature and is
//! used by the PyO3 glue in `lib.rs`.
#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    optimization::loglik_optimizer::traits::{LineSearcher, MLEOptions, Tolerances},
    volatility::{
        core::{
            data::ReturnSeries,
            guards::VarianceGuards,
            init::Init,
            options::{DEFAULT_FEASIBILITY_TOL, GarchOptions, PenaltySchedule},
        },
        errors::GarchError,
    },
};

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArrayMethods, PyReadonlyArray1};

/// Accept a 1-D `numpy.ndarray`, a `pandas.Series`, or a float sequence.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy an array-like into an owned `Array1<f64>`.
#[cfg(feature = "python-bindings")]
pub fn extract_owned_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>, name: &str,
) -> PyResult<Array1<f64>> {
    let arr = extract_f64_array(py, raw_data)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err(format!("{name} must be a 1-D contiguous float64 array or sequence"))
    })?;
    Ok(Array1::from(slice.to_vec()))
}

/// Validated return series from an array-like.
#[cfg(feature = "python-bindings")]
pub fn extract_returns<'py>(
    py: Python<'py>, returns: &Bound<'py, PyAny>,
) -> PyResult<ReturnSeries> {
    let data = extract_owned_array(py, returns, "returns")?;
    Ok(ReturnSeries::new(data)?)
}

/// Assemble [`GarchOptions`] from optional Python keyword arguments.
#[cfg(feature = "python-bindings")]
#[allow(clippy::too_many_arguments)]
pub fn build_garch_options<'py>(
    py: Python<'py>, init_theta: Option<&Bound<'py, PyAny>>, tol_grad: Option<f64>,
    tol_cost: Option<f64>, max_iter: Option<usize>, line_searcher: Option<&str>,
    lbfgs_mem: Option<usize>, variance_guards: Option<(f64, f64)>,
    penalty: Option<(f64, f64, usize)>, feasibility_tol: Option<f64>,
) -> PyResult<GarchOptions> {
    let init = match init_theta {
        Some(raw) => Init::fixed(extract_owned_array(py, raw, "init_theta")?)?,
        None => Init::Priors,
    };
    let mle_opts = extract_mle_opts(tol_grad, tol_cost, max_iter, line_searcher, lbfgs_mem)?;
    let guards = match variance_guards {
        Some(bounds) => VarianceGuards::new(bounds)?,
        None => VarianceGuards::default(),
    };
    let schedule = match penalty {
        Some((weight, growth, rounds)) => PenaltySchedule::new(weight, growth, rounds)?,
        None => PenaltySchedule::default(),
    };
    let tol = feasibility_tol.unwrap_or(DEFAULT_FEASIBILITY_TOL);
    Ok(GarchOptions::new(init, mle_opts, guards, schedule, tol)?)
}

#[cfg(feature = "python-bindings")]
fn extract_mle_opts(
    tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
) -> PyResult<MLEOptions> {
    use std::str::FromStr;

    let defaults = MLEOptions::default();
    let tols = if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
        defaults.tols
    } else {
        Tolerances::new(tol_grad, tol_cost, max_iter).map_err(GarchError::from)?
    };
    let ls = match line_searcher {
        Some(name) => LineSearcher::from_str(name).map_err(GarchError::from)?,
        None => defaults.line_searcher,
    };
    Ok(MLEOptions::new(tols, ls, lbfgs_mem).map_err(GarchError::from)?)
}
