// ─────────────────────────────────────────────────────────────────────
// Taylor Surface Explorer — PyO3 FFI Bindings
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
// Note: #[deny(unsafe_code)] not applied — PyO3 proc macros generate
// unsafe blocks internally. All hand-written code in this crate is safe.
//! Python-callable wrappers around the Taylor expansion engine.
//!
//! Exposes `ExplorerConfig`, `ExpansionState`, `TaylorCoefficients`,
//! `Explorer`, and module-level helpers to a Python front end via PyO3.
//!
//! # FFI Safety
//!
//! - GIL acquired via `Python::with_gil` before every Python callback.
//! - Python exceptions in explanation callbacks → fallback message.
//! - Surfaces cross as plain lists of floats; no Rust references escape.
//! - All config validated before storage (`ExplorerConfig::validate()`).
//!
//! Usage from Python:
//! ```python
//! from taylorview import Explorer
//!
//! ex = Explorer()
//! ex.select("saddle")
//! ex.toggle_order(1)
//! data = ex.surfaces()   # dict: xs, ys, z_real, z_approx, marker, ...
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use taylorview_core::{
    Catalog, Explorer, ExternalExplainer, GeometricExplainer, SmoothFunction, TaylorEvaluator,
};
use taylorview_types::{
    ExpansionState, ExplorerConfig, Order, SamplingConfig, SurfaceSet, TaylorCoefficients,
    TaylorError,
};

fn to_py_err(e: TaylorError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn parse_order(order: u8) -> PyResult<Order> {
    Order::try_from(order).map_err(to_py_err)
}

fn coefficients_dict<'py>(
    py: Python<'py>,
    c: &TaylorCoefficients,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("f", c.f)?;
    dict.set_item("fx", c.fx)?;
    dict.set_item("fy", c.fy)?;
    dict.set_item("fxx", c.fxx)?;
    dict.set_item("fyy", c.fyy)?;
    dict.set_item("fxy", c.fxy)?;
    Ok(dict)
}

fn surfaces_dict<'py>(py: Python<'py>, s: SurfaceSet) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    let marker = PyDict::new(py);
    marker.set_item("x", s.marker.x)?;
    marker.set_item("y", s.marker.y)?;
    marker.set_item("z", s.marker.z)?;
    dict.set_item("has_approximation", s.has_approximation())?;
    dict.set_item("max_abs_error", s.max_abs_error())?;
    dict.set_item("coefficients", coefficients_dict(py, &s.coefficients)?)?;
    dict.set_item("marker", marker)?;
    dict.set_item("xs", s.xs)?;
    dict.set_item("ys", s.ys)?;
    dict.set_item("z_real", s.z_real)?;
    dict.set_item("z_approx", s.z_approx)?;
    Ok(dict)
}

fn function_dict<'py>(py: Python<'py>, f: &dyn SmoothFunction) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("id", f.id())?;
    dict.set_item("name", f.name())?;
    dict.set_item("formula", f.formula())?;
    dict.set_item("description", f.description())?;
    Ok(dict)
}

// ─── PyExplorerConfig ───────────────────────────────────────────────

/// Python-visible explorer configuration.
#[pyclass(name = "ExplorerConfig")]
#[derive(Clone)]
struct PyExplorerConfig {
    inner: ExplorerConfig,
}

#[pymethods]
impl PyExplorerConfig {
    #[new]
    #[pyo3(signature = (
        grid_min = -3.0,
        grid_max = 3.0,
        grid_step = 0.2,
        point_min = -2.0,
        point_max = 2.0,
        point_step = 0.1,
        explanation_language = "Chinese".to_string(),
    ))]
    fn new(
        grid_min: f64,
        grid_max: f64,
        grid_step: f64,
        point_min: f64,
        point_max: f64,
        point_step: f64,
        explanation_language: String,
    ) -> PyResult<Self> {
        let config = ExplorerConfig {
            sampling: SamplingConfig {
                min: grid_min,
                max: grid_max,
                step: grid_step,
            },
            point_min,
            point_max,
            point_step,
            explanation_language,
        };
        config.validate().map_err(|e| {
            log::warn!("rejected explorer config: {e}");
            to_py_err(e)
        })?;
        Ok(Self { inner: config })
    }

    /// Construct from JSON string.
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let config = ExplorerConfig::from_json(json).map_err(to_py_err)?;
        config.validate().map_err(to_py_err)?;
        Ok(Self { inner: config })
    }

    #[getter]
    fn grid_points(&self) -> usize {
        self.inner.sampling.point_count()
    }

    fn clamp_point(&self, value: f64) -> f64 {
        self.inner.clamp_point(value)
    }

    fn __repr__(&self) -> String {
        format!(
            "ExplorerConfig(grid=[{}, {}] step {}, point=[{}, {}] step {})",
            self.inner.sampling.min,
            self.inner.sampling.max,
            self.inner.sampling.step,
            self.inner.point_min,
            self.inner.point_max,
            self.inner.point_step,
        )
    }
}

// ─── PyExpansionState ───────────────────────────────────────────────

/// Immutable expansion state; mutators return a new object.
#[pyclass(name = "ExpansionState", frozen)]
#[derive(Clone)]
struct PyExpansionState {
    inner: ExpansionState,
}

#[pymethods]
impl PyExpansionState {
    #[new]
    #[pyo3(signature = (x0 = 0.5, y0 = 0.5))]
    fn new(x0: f64, y0: f64) -> Self {
        Self {
            inner: ExpansionState::new().with_point(x0, y0),
        }
    }

    #[getter]
    fn x0(&self) -> f64 {
        self.inner.x0
    }

    #[getter]
    fn y0(&self) -> f64 {
        self.inner.y0
    }

    #[getter]
    fn show_order0(&self) -> bool {
        self.inner.show_order0()
    }

    #[getter]
    fn show_order1(&self) -> bool {
        self.inner.show_order1()
    }

    #[getter]
    fn show_order2(&self) -> bool {
        self.inner.show_order2()
    }

    fn with_point(&self, x0: f64, y0: f64) -> Self {
        Self {
            inner: self.inner.with_point(x0, y0),
        }
    }

    /// Toggle order 0, 1 or 2 under the progressive disclosure rule.
    fn toggle_order(&self, order: u8) -> PyResult<Self> {
        Ok(Self {
            inner: self.inner.toggle_order(parse_order(order)?),
        })
    }

    fn active_labels(&self) -> Vec<&'static str> {
        self.inner.active_labels()
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.inner == other.inner
    }

    fn __repr__(&self) -> String {
        format!(
            "ExpansionState(x0={:.2}, y0={:.2}, orders={:?})",
            self.inner.x0,
            self.inner.y0,
            self.inner.active_orders().iter().map(Order::index).collect::<Vec<_>>(),
        )
    }
}

// ─── PyTaylorCoefficients ───────────────────────────────────────────

/// Python-visible coefficient set.
#[pyclass(name = "TaylorCoefficients", frozen)]
#[derive(Clone)]
struct PyTaylorCoefficients {
    inner: TaylorCoefficients,
}

#[pymethods]
impl PyTaylorCoefficients {
    #[getter]
    fn f(&self) -> f64 {
        self.inner.f
    }

    #[getter]
    fn fx(&self) -> f64 {
        self.inner.fx
    }

    #[getter]
    fn fy(&self) -> f64 {
        self.inner.fy
    }

    #[getter]
    fn fxx(&self) -> f64 {
        self.inner.fxx
    }

    #[getter]
    fn fyy(&self) -> f64 {
        self.inner.fyy
    }

    #[getter]
    fn fxy(&self) -> f64 {
        self.inner.fxy
    }

    fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        coefficients_dict(py, &self.inner)
    }

    fn __repr__(&self) -> String {
        let c = &self.inner;
        format!(
            "TaylorCoefficients(f={:.4}, fx={:.4}, fy={:.4}, fxx={:.4}, fyy={:.4}, fxy={:.4})",
            c.f, c.fx, c.fy, c.fxx, c.fyy, c.fxy
        )
    }
}

// ─── PyExplorer ─────────────────────────────────────────────────────

/// One exploration session: selected function plus expansion state.
#[pyclass(name = "Explorer")]
struct PyExplorer {
    inner: Explorer,
}

#[pymethods]
impl PyExplorer {
    #[new]
    #[pyo3(signature = (config = None))]
    fn new(config: Option<PyExplorerConfig>) -> PyResult<Self> {
        let config = config.map(|c| c.inner).unwrap_or_default();
        Ok(Self {
            inner: Explorer::new(config).map_err(to_py_err)?,
        })
    }

    #[getter]
    fn function_id(&self) -> &'static str {
        self.inner.function().id()
    }

    #[getter]
    fn state(&self) -> PyExpansionState {
        PyExpansionState {
            inner: self.inner.state(),
        }
    }

    fn select(&mut self, function_id: &str) -> PyResult<()> {
        self.inner.select(function_id).map_err(to_py_err)
    }

    fn set_point(&mut self, x0: f64, y0: f64) -> PyExpansionState {
        PyExpansionState {
            inner: self.inner.set_point(x0, y0),
        }
    }

    fn toggle_order(&mut self, order: u8) -> PyResult<PyExpansionState> {
        Ok(PyExpansionState {
            inner: self.inner.toggle_order(parse_order(order)?),
        })
    }

    fn coefficients(&self) -> PyTaylorCoefficients {
        PyTaylorCoefficients {
            inner: self.inner.coefficients(),
        }
    }

    /// Dict with xs, ys, z_real, z_approx, marker, coefficients,
    /// has_approximation, max_abs_error.
    fn surfaces<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        surfaces_dict(py, self.inner.surfaces())
    }

    /// Expansion formula with only the active term groups.
    fn formula(&self) -> String {
        self.inner.formula().to_string()
    }

    /// All term groups as dicts: order, text, active.
    fn formula_terms<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyList>> {
        let list = PyList::empty(py);
        for term in self.inner.formula().terms {
            let dict = PyDict::new(py);
            dict.set_item("order", term.order.index())?;
            dict.set_item("text", term.text)?;
            dict.set_item("active", term.active)?;
            list.append(dict)?;
        }
        Ok(list)
    }

    /// Prompt the explanation service would receive.
    fn explanation_prompt(&self) -> String {
        self.inner.explanation_request().prompt()
    }

    /// Explain the current view.
    ///
    /// Args:
    ///     callback: Callable[[str], str] receiving the prompt. When
    ///         omitted, an offline geometric explanation is returned.
    ///
    /// Returns:
    ///     Explanation text, or a fallback message if the callback raised.
    #[pyo3(signature = (callback = None))]
    fn explain(&self, callback: Option<PyObject>) -> String {
        let Some(callback) = callback else {
            return self.inner.explain(&GeometricExplainer);
        };
        let backend = ExternalExplainer::new(move |request| {
            Python::with_gil(|py| {
                callback
                    .call1(py, (request.prompt(),))
                    .and_then(|result| result.extract::<String>(py))
                    .map_err(|e| TaylorError::Explanation(e.to_string()))
            })
        });
        self.inner.explain(&backend)
    }

    fn __repr__(&self) -> String {
        let s = self.inner.state();
        format!(
            "Explorer(function={}, x0={:.2}, y0={:.2}, labels={:?})",
            self.inner.function().id(),
            s.x0,
            s.y0,
            s.active_labels(),
        )
    }
}

// ─── Module functions ───────────────────────────────────────────────

/// Catalog entries as dicts: id, name, formula, description.
#[pyfunction]
fn list_functions(py: Python<'_>) -> PyResult<Bound<'_, PyList>> {
    let list = PyList::empty(py);
    for f in Catalog::list() {
        list.append(function_dict(py, *f)?)?;
    }
    Ok(list)
}

/// Coefficients of a catalog function at `(x0, y0)`.
#[pyfunction]
fn compute_coefficients(function_id: &str, x0: f64, y0: f64) -> PyResult<PyTaylorCoefficients> {
    let f = Catalog::get(function_id).map_err(to_py_err)?;
    Ok(PyTaylorCoefficients {
        inner: taylorview_core::compute_coefficients(f, x0, y0),
    })
}

/// Surfaces of a catalog function on the default grid.
#[pyfunction]
fn compute_surfaces<'py>(
    py: Python<'py>,
    function_id: &str,
    state: &PyExpansionState,
) -> PyResult<Bound<'py, PyDict>> {
    let f = Catalog::get(function_id).map_err(to_py_err)?;
    let surfaces = TaylorEvaluator::default().compute_surfaces(f, &state.inner);
    surfaces_dict(py, surfaces)
}

/// Python module definition.
///
/// Exports:
/// - `ExplorerConfig` — grid and slider configuration
/// - `ExpansionState` — expansion point + order flags
/// - `TaylorCoefficients` — value and partials at a point
/// - `Explorer` — stateful session wrapper
/// - `list_functions`, `compute_coefficients`, `compute_surfaces`
#[pymodule]
fn taylorview(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyExplorerConfig>()?;
    m.add_class::<PyExpansionState>()?;
    m.add_class::<PyTaylorCoefficients>()?;
    m.add_class::<PyExplorer>()?;
    m.add_function(wrap_pyfunction!(list_functions, m)?)?;
    m.add_function(wrap_pyfunction!(compute_coefficients, m)?)?;
    m.add_function(wrap_pyfunction!(compute_surfaces, m)?)?;
    Ok(())
}
