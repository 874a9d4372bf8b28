//! Reduction backends hosted in an embedded Python interpreter.
//!
//! Requires the `python` feature and an interpreter where the estimator's
//! module (`ivis`, `umap`) is importable.

use ndarray::Array2;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};
use serde_json::Value;
use tracing::debug;

use super::ReductionBackend;
use crate::error::{ReduceError, Result};
use crate::options::{neighbour_defaults, TransformOptions};

/// A scikit-learn style estimator class: constructed with keyword options,
/// exposing `fit(X)` and `fit_transform(X)`.
pub struct PythonEstimator {
    name: &'static str,
    module: &'static str,
    class: &'static str,
    /// Keyword the class uses for the output dimensionality.
    dims_kwarg: &'static str,
    neighbour_defaults: bool,
    model: Option<Py<PyAny>>,
    fitted: bool,
}

impl PythonEstimator {
    pub fn new(
        name: &'static str,
        module: &'static str,
        class: &'static str,
        dims_kwarg: &'static str,
    ) -> Self {
        Self {
            name,
            module,
            class,
            dims_kwarg,
            neighbour_defaults: false,
            model: None,
            fitted: false,
        }
    }

    /// Ivis from the `ivis` package: `ivis.Ivis(embedding_dims=..)`, with
    /// neighbour/batch defaults.
    pub fn ivis() -> Self {
        Self {
            neighbour_defaults: true,
            ..Self::new("ivis", "ivis", "Ivis", "embedding_dims")
        }
    }

    /// UMAP from the `umap-learn` package: `umap.UMAP(n_components=..)`.
    pub fn umap() -> Self {
        Self::new("umap", "umap", "UMAP", "n_components")
    }

    fn err(&self, e: impl ToString) -> ReduceError {
        ReduceError::backend(self.name, e)
    }

    fn model(&self) -> Result<&Py<PyAny>> {
        self.model
            .as_ref()
            .ok_or_else(|| self.err("estimator not built"))
    }
}

fn set_option(kwargs: &Bound<'_, PyDict>, key: &str, value: &Value) -> PyResult<()> {
    match value {
        Value::Null => kwargs.set_item(key, kwargs.py().None()),
        Value::Bool(b) => kwargs.set_item(key, *b),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => kwargs.set_item(key, i),
            (None, Some(f)) => kwargs.set_item(key, f),
            (None, None) => kwargs.set_item(key, n.to_string()),
        },
        Value::String(s) => kwargs.set_item(key, s.as_str()),
        other => Err(pyo3::exceptions::PyTypeError::new_err(format!(
            "option '{}' has unsupported value {}",
            key, other
        ))),
    }
}

fn to_numpy<'py>(py: Python<'py>, data: &Array2<f32>) -> PyResult<Bound<'py, PyAny>> {
    let np = py.import("numpy")?;
    let rows: Vec<Bound<'_, PyList>> = data
        .rows()
        .into_iter()
        .map(|row| PyList::new(py, row.iter()))
        .collect::<PyResult<Vec<_>>>()?;
    let py_list = PyList::new(py, rows.iter())?;
    np.call_method1("array", (py_list, "float32"))
}

fn from_numpy(result: &Bound<'_, PyAny>) -> PyResult<Vec<Vec<f32>>> {
    result.call_method0("tolist")?.extract()
}

impl ReductionBackend for PythonEstimator {
    fn name(&self) -> &str {
        self.name
    }

    fn default_options(&self, n_rows: usize) -> TransformOptions {
        if self.neighbour_defaults {
            neighbour_defaults(n_rows)
        } else {
            TransformOptions::new()
        }
    }

    fn build(&mut self, n_components: usize, options: &TransformOptions) -> Result<()> {
        let model = Python::with_gil(|py| -> PyResult<Py<PyAny>> {
            let module = py.import(self.module)?;
            let kwargs = PyDict::new(py);
            for (key, value) in options.iter() {
                set_option(&kwargs, key, value)?;
            }
            kwargs.set_item(self.dims_kwarg, n_components)?;
            let estimator = module.getattr(self.class)?.call((), Some(&kwargs))?;
            Ok(estimator.unbind())
        })
        .map_err(|e| self.err(e))?;

        debug!("{} estimator built with {} options", self.name, options.len());
        self.model = Some(model);
        self.fitted = false;
        Ok(())
    }

    fn fit(&mut self, data: &Array2<f32>) -> Result<()> {
        let model = self.model()?;
        Python::with_gil(|py| -> PyResult<()> {
            let x = to_numpy(py, data)?;
            model.bind(py).call_method1("fit", (x,))?;
            Ok(())
        })
        .map_err(|e| self.err(e))?;
        self.fitted = true;
        Ok(())
    }

    fn fit_transform(&mut self, data: &Array2<f32>) -> Result<Array2<f32>> {
        let model = self.model()?;
        let rows = Python::with_gil(|py| -> PyResult<Vec<Vec<f32>>> {
            let x = to_numpy(py, data)?;
            let result = model.bind(py).call_method1("fit_transform", (x,))?;
            from_numpy(&result)
        })
        .map_err(|e| self.err(e))?;
        self.fitted = true;

        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let flat: Vec<f32> = rows.into_iter().flatten().collect();
        Ok(Array2::from_shape_vec((n_rows, n_cols), flat)?)
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyo3::types::{PyBool, PyFloat, PyInt, PyString};
    use serde_json::json;

    fn converted<'py>(kwargs: &Bound<'py, PyDict>, key: &str) -> Bound<'py, PyAny> {
        kwargs.get_item(key).unwrap().unwrap()
    }

    #[test]
    fn json_options_become_python_values() {
        Python::with_gil(|py| {
            let kwargs = PyDict::new(py);
            set_option(&kwargs, "k", &json!(15)).unwrap();
            set_option(&kwargs, "min_dist", &json!(0.25)).unwrap();
            set_option(&kwargs, "verbose", &json!(false)).unwrap();
            set_option(&kwargs, "seed", &json!(null)).unwrap();
            set_option(&kwargs, "metric", &json!("cosine")).unwrap();

            let k = converted(&kwargs, "k");
            assert!(k.is_exact_instance_of::<PyInt>());
            assert_eq!(k.extract::<i64>().unwrap(), 15);

            let min_dist = converted(&kwargs, "min_dist");
            assert!(min_dist.is_instance_of::<PyFloat>());
            assert_eq!(min_dist.extract::<f64>().unwrap(), 0.25);

            let verbose = converted(&kwargs, "verbose");
            assert!(verbose.is_instance_of::<PyBool>());
            assert!(!verbose.extract::<bool>().unwrap());

            assert!(converted(&kwargs, "seed").is_none());

            let metric = converted(&kwargs, "metric");
            assert!(metric.is_instance_of::<PyString>());
            assert_eq!(metric.extract::<String>().unwrap(), "cosine");
        });
    }

    #[test]
    fn nested_options_are_rejected() {
        Python::with_gil(|py| {
            let kwargs = PyDict::new(py);
            assert!(set_option(&kwargs, "layers", &json!([1, 2])).is_err());
            assert!(set_option(&kwargs, "extra", &json!({"a": 1})).is_err());
            assert_eq!(kwargs.len(), 0);
        });
    }
}
