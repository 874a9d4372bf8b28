//! Bridges embedding sets to reduction backends.
//!
//! A [`Reducer`] decomposes a set into names and a matrix, hands the matrix
//! to its backend, and rebuilds a set with the same names in the same order.
//! It then appends one synthetic basis embedding per output component,
//! `"{backend}_{i}"` with a one-hot vector, so the new axes can be used as
//! axis specifications when plotting the reduced space.
//!
//! The backend is fitted on the first call and then `fit_transform` runs on
//! every call, including the first. Every call therefore refits the model
//! on the data it is given; nothing learned from an earlier set is reused.

use std::time::Instant;

use ndarray::{concatenate, Array2, Axis};
use tracing::{debug, info};
use vecplot_core::{EmbeddingSet, Transformer};

use crate::backend::ReductionBackend;
use crate::error::{ReduceError, Result};
use crate::options::TransformOptions;

/// Default number of output components.
pub const DEFAULT_COMPONENTS: usize = 2;

/// Transform adapter around a reduction backend.
pub struct Reducer<B> {
    backend: B,
    n_components: usize,
    options: TransformOptions,
    configured: bool,
    fitted: bool,
}

impl<B: ReductionBackend> Reducer<B> {
    pub fn new(backend: B, n_components: usize) -> Self {
        Self {
            backend,
            n_components,
            options: TransformOptions::new(),
            configured: false,
            fitted: false,
        }
    }

    /// Replace the pass-through options. Only effective before the first call.
    pub fn with_options(mut self, options: TransformOptions) -> Self {
        self.options = options;
        self
    }

    /// Set one pass-through option. Only effective before the first call.
    pub fn with_option(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.options.set(key, value);
        self
    }

    pub fn n_components(&self) -> usize {
        self.n_components
    }

    /// Options as passed to the backend, including derived defaults once
    /// configured.
    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Name the output set is given: `"{set}.{backend}({n_components})"`.
    pub fn output_name(&self, set: &EmbeddingSet) -> String {
        format!(
            "{}.{}({})",
            set.display_name(),
            self.backend.name(),
            self.n_components
        )
    }

    /// Names of the synthetic basis embeddings, `"{backend}_{i}"`.
    pub fn axis_names(&self) -> Vec<String> {
        (0..self.n_components)
            .map(|i| format!("{}_{}", self.backend.name(), i))
            .collect()
    }

    /// Derive unset options from the input size and build the backend.
    ///
    /// Runs once per reducer; later calls return immediately, keeping the
    /// options derived from the first input.
    pub fn ensure_configured(&mut self, n_rows: usize) -> Result<()> {
        if self.configured {
            return Ok(());
        }
        if self.n_components == 0 {
            return Err(ReduceError::Config(
                "n_components must be at least 1".to_string(),
            ));
        }

        let defaults = self.backend.default_options(n_rows);
        debug!(
            "{} defaults for {} rows: {:?}",
            self.backend.name(),
            n_rows,
            defaults
        );
        self.options.fill_missing(defaults);
        self.backend.build(self.n_components, &self.options)?;
        self.configured = true;
        Ok(())
    }

    /// Transform `set`, fitting the backend first if this is the first call.
    pub fn apply(&mut self, set: &EmbeddingSet) -> Result<EmbeddingSet> {
        if !self.fitted {
            self.ensure_configured(set.len())?;
            self.fit(set)?;
        }
        self.transform(set)
    }

    /// Fit the backend on `set`.
    pub fn fit(&mut self, set: &EmbeddingSet) -> Result<()> {
        self.ensure_configured(set.len())?;
        let (_, matrix) = set.to_matrix()?;
        let start = Instant::now();
        self.backend.fit(&matrix)?;
        self.fitted = true;
        info!(
            "{} fit complete: {} points in {}ms",
            self.backend.name(),
            matrix.nrows(),
            start.elapsed().as_millis()
        );
        Ok(())
    }

    /// Run the backend's `fit_transform` on `set` and rebuild the set.
    pub fn transform(&mut self, set: &EmbeddingSet) -> Result<EmbeddingSet> {
        self.ensure_configured(set.len())?;
        let (mut names, matrix) = set.to_matrix()?;
        let start = Instant::now();
        let reduced = self.backend.fit_transform(&matrix)?;

        if reduced.dim() != (names.len(), self.n_components) {
            return Err(ReduceError::OutputShape {
                backend: self.backend.name().to_string(),
                rows: reduced.nrows(),
                cols: reduced.ncols(),
                expected_rows: names.len(),
                expected_cols: self.n_components,
            });
        }

        let basis = Array2::<f32>::eye(self.n_components);
        let stacked = concatenate(Axis(0), &[reduced.view(), basis.view()])?;
        names.extend(self.axis_names());

        let out =
            EmbeddingSet::from_matrix(&names, &stacked)?.with_name(self.output_name(set));
        info!(
            "{} transform complete: {} points in {}ms",
            self.backend.name(),
            set.len(),
            start.elapsed().as_millis()
        );
        Ok(out)
    }
}

impl<B: ReductionBackend> Transformer for Reducer<B> {
    type Error = ReduceError;

    fn apply(&mut self, set: &EmbeddingSet) -> Result<EmbeddingSet> {
        Reducer::apply(self, set)
    }
}
