//! Reduction backends.
//!
//! A backend is an opaque fit/transform routine over a row-per-point matrix.
//! The native [`Pca`] backend is always available; Python-hosted backends
//! (Ivis and UMAP through `PythonEstimator`) need the `python` feature and an interpreter with the
//! corresponding packages installed.

mod pca;
#[cfg(feature = "python")]
mod python;

pub use pca::Pca;
#[cfg(feature = "python")]
pub use python::PythonEstimator;

use ndarray::Array2;

use crate::error::Result;
use crate::options::{neighbour_defaults, TransformOptions};

/// Contract for dimensionality reduction backends.
pub trait ReductionBackend {
    /// Short lowercase name, used for synthetic axis names (`"{name}_{i}"`).
    fn name(&self) -> &str;

    /// Options derived from the input size, applied where the caller left a
    /// key unset. Defaults to the neighbour/batch/verbosity policy.
    fn default_options(&self, n_rows: usize) -> TransformOptions {
        neighbour_defaults(n_rows)
    }

    /// Configure the backend for `n_components` output dimensions.
    fn build(&mut self, n_components: usize, options: &TransformOptions) -> Result<()>;

    /// Fit the model on `data` (rows are points).
    fn fit(&mut self, data: &Array2<f32>) -> Result<()>;

    /// Fit the model on `data` and return its projection.
    fn fit_transform(&mut self, data: &Array2<f32>) -> Result<Array2<f32>>;

    /// Whether the model has been fitted.
    fn is_fitted(&self) -> bool;
}
