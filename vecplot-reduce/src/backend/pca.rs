//! Principal component analysis by power iteration.

use ndarray::{Array1, Array2, Axis};
use tracing::debug;

use super::ReductionBackend;
use crate::error::{ReduceError, Result};
use crate::options::TransformOptions;

const NAME: &str = "pca";
const DEFAULT_MAX_ITER: usize = 500;
const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Fitted state: column means and one unit-length component per row.
#[derive(Debug, Clone)]
struct PcaModel {
    mean: Array1<f64>,
    components: Array2<f64>,
    explained_variance: Vec<f64>,
}

/// Native PCA backend.
///
/// Components are found one at a time by power iteration on the covariance
/// matrix with deflation. Each component's sign is fixed so that its
/// largest-magnitude entry is positive, which makes output deterministic.
///
/// Options: `max_iter` (positive integer, default 500) and `tol`
/// (non-negative, default 1e-9). A value that cannot be read is a
/// [`ReduceError::Config`].
#[derive(Debug, Clone)]
pub struct Pca {
    n_components: usize,
    max_iter: usize,
    tolerance: f64,
    model: Option<PcaModel>,
}

impl Pca {
    pub fn new() -> Self {
        Self {
            n_components: 0,
            max_iter: DEFAULT_MAX_ITER,
            tolerance: DEFAULT_TOLERANCE,
            model: None,
        }
    }

    /// Variance captured by each fitted component, largest first.
    pub fn explained_variance(&self) -> Option<&[f64]> {
        self.model.as_ref().map(|m| m.explained_variance.as_slice())
    }

    /// Project `data` with the fitted model.
    pub fn transform(&self, data: &Array2<f32>) -> Result<Array2<f32>> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| ReduceError::backend(NAME, "model not fitted"))?;
        if data.ncols() != model.mean.len() {
            return Err(ReduceError::backend(
                NAME,
                format!(
                    "expected {} features, got {}",
                    model.mean.len(),
                    data.ncols()
                ),
            ));
        }
        let centered = data.mapv(f64::from) - &model.mean;
        Ok(centered.dot(&model.components.t()).mapv(|v| v as f32))
    }

    fn fit_model(&self, data: &Array2<f32>) -> Result<PcaModel> {
        let (n_rows, n_cols) = data.dim();
        if n_rows == 0 {
            return Err(ReduceError::backend(NAME, "cannot fit on zero rows"));
        }
        if self.n_components == 0 {
            return Err(ReduceError::backend(NAME, "n_components must be positive"));
        }
        if self.n_components > n_cols {
            return Err(ReduceError::backend(
                NAME,
                format!(
                    "n_components={} must be at most the number of features ({})",
                    self.n_components, n_cols
                ),
            ));
        }

        let x = data.mapv(f64::from);
        let mean = x
            .mean_axis(Axis(0))
            .ok_or_else(|| ReduceError::backend(NAME, "cannot fit on zero rows"))?;
        let centered = &x - &mean;
        let denom = (n_rows.max(2) - 1) as f64;
        let mut cov = centered.t().dot(&centered) / denom;

        let mut components = Array2::<f64>::zeros((self.n_components, n_cols));
        let mut explained_variance = Vec::with_capacity(self.n_components);

        for c in 0..self.n_components {
            let (vector, value) = self.leading_eigenpair(&cov);
            let outer = vector
                .view()
                .insert_axis(Axis(1))
                .dot(&vector.view().insert_axis(Axis(0)));
            cov = cov - outer * value;
            components.row_mut(c).assign(&vector);
            explained_variance.push(value);
        }

        debug!(
            "pca fitted {} components on {}x{} data, variance {:?}",
            self.n_components, n_rows, n_cols, explained_variance
        );

        Ok(PcaModel {
            mean,
            components,
            explained_variance,
        })
    }

    /// Dominant eigenvector and eigenvalue of a symmetric matrix.
    fn leading_eigenpair(&self, cov: &Array2<f64>) -> (Array1<f64>, f64) {
        let n = cov.nrows();

        // Start on the axis with the largest remaining variance.
        let start = (0..n)
            .max_by(|&a, &b| cov[[a, a]].total_cmp(&cov[[b, b]]))
            .unwrap_or(0);
        let mut v = Array1::<f64>::zeros(n);
        v[start] = 1.0;

        for _ in 0..self.max_iter {
            let w = cov.dot(&v);
            let norm = w.dot(&w).sqrt();
            if norm < f64::EPSILON {
                // Nothing left to explain in this subspace.
                return (v, 0.0);
            }
            let next = w / norm;
            let delta = (&next - &v).mapv(f64::abs).sum();
            v = next;
            if delta < self.tolerance {
                break;
            }
        }

        let largest = v
            .iter()
            .copied()
            .max_by(|a, b| a.abs().total_cmp(&b.abs()))
            .unwrap_or(0.0);
        if largest < 0.0 {
            v.mapv_inplace(|x| -x);
        }

        let value = v.dot(&cov.dot(&v)).max(0.0);
        (v, value)
    }
}

/// Read `key` with `parse`, falling back to `default` only when it is unset.
fn read_option<T>(
    options: &TransformOptions,
    key: &str,
    default: T,
    parse: impl Fn(&serde_json::Value) -> Option<T>,
) -> Result<T> {
    match options.get(key) {
        None => Ok(default),
        Some(value) => parse(value).ok_or_else(|| {
            ReduceError::Config(format!("pca option '{}' has invalid value {}", key, value))
        }),
    }
}

impl Default for Pca {
    fn default() -> Self {
        Self::new()
    }
}

impl ReductionBackend for Pca {
    fn name(&self) -> &str {
        NAME
    }

    fn default_options(&self, _n_rows: usize) -> TransformOptions {
        TransformOptions::new()
    }

    fn build(&mut self, n_components: usize, options: &TransformOptions) -> Result<()> {
        self.n_components = n_components;
        self.max_iter = read_option(options, "max_iter", DEFAULT_MAX_ITER, |v| {
            v.as_u64().filter(|n| *n > 0).map(|n| n as usize)
        })?;
        self.tolerance = read_option(options, "tol", DEFAULT_TOLERANCE, |v| {
            v.as_f64().filter(|t| t.is_finite() && *t >= 0.0)
        })?;
        self.model = None;
        Ok(())
    }

    fn fit(&mut self, data: &Array2<f32>) -> Result<()> {
        self.model = Some(self.fit_model(data)?);
        Ok(())
    }

    fn fit_transform(&mut self, data: &Array2<f32>) -> Result<Array2<f32>> {
        self.fit(data)?;
        self.transform(data)
    }

    fn is_fitted(&self) -> bool {
        self.model.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn built(n_components: usize) -> Pca {
        let mut pca = Pca::new();
        pca.build(n_components, &TransformOptions::new()).unwrap();
        pca
    }

    #[test]
    fn recovers_dominant_direction() {
        // Points spread along x = y, with a little noise off the line.
        let data = array![
            [-2.0f32, -2.1],
            [-1.0, -0.9],
            [0.0, 0.1],
            [1.0, 0.9],
            [2.0, 2.0],
        ];
        let mut pca = built(1);
        let out = pca.fit_transform(&data).unwrap();
        assert_eq!(out.dim(), (5, 1));

        let model = pca.model.as_ref().unwrap();
        let c = model.components.row(0);
        assert!((c[0] - c[1]).abs() < 0.05, "component {:?}", c);
        assert!(c[0] > 0.0);

        // Projections are ordered along the line.
        for i in 1..5 {
            assert!(out[[i, 0]] > out[[i - 1, 0]]);
        }
    }

    #[test]
    fn components_are_orthonormal() {
        let data = array![
            [1.0f32, 0.0, 3.0],
            [0.5, 2.0, 1.0],
            [2.0, 1.0, 0.0],
            [0.0, 3.0, 2.5],
            [1.5, 0.5, 1.0],
        ];
        let mut pca = built(2);
        pca.fit(&data).unwrap();
        let comps = &pca.model.as_ref().unwrap().components;
        let gram = comps.dot(&comps.t());
        assert!((gram[[0, 0]] - 1.0).abs() < 1e-6);
        assert!((gram[[1, 1]] - 1.0).abs() < 1e-6);
        assert!(gram[[0, 1]].abs() < 1e-3);

        let variance = pca.explained_variance().unwrap();
        assert!(variance[0] >= variance[1]);
    }

    #[test]
    fn too_many_components() {
        let data = array![[1.0f32, 2.0], [3.0, 4.0]];
        let mut pca = built(3);
        let err = pca.fit(&data).unwrap_err();
        assert!(err.to_string().contains("n_components=3"));
        assert!(!pca.is_fitted());
    }

    #[test]
    fn reads_numeric_options() {
        let mut pca = Pca::new();
        let options = TransformOptions::new().with("max_iter", 20).with("tol", 1e-4);
        pca.build(2, &options).unwrap();
        assert_eq!(pca.max_iter, 20);
        assert_eq!(pca.tolerance, 1e-4);
    }

    #[test]
    fn rejects_unreadable_options() {
        for (key, value) in [
            ("max_iter", serde_json::json!(-5)),
            ("max_iter", serde_json::json!(1.5)),
            ("max_iter", serde_json::json!("many")),
            ("tol", serde_json::json!(-1.0)),
            ("tol", serde_json::json!(null)),
        ] {
            let mut pca = Pca::new();
            let options = TransformOptions::new().with(key, value.clone());
            match pca.build(2, &options) {
                Err(ReduceError::Config(message)) => assert!(message.contains(key)),
                other => panic!("{}={} should fail, got {:?}", key, value, other),
            }
        }
    }

    #[test]
    fn transform_requires_fit() {
        let pca = built(1);
        assert!(pca.transform(&array![[1.0f32, 2.0]]).is_err());
    }

    #[test]
    fn constant_data_projects_to_zero() {
        let data = array![[1.0f32, 1.0], [1.0, 1.0], [1.0, 1.0]];
        let mut pca = built(2);
        let out = pca.fit_transform(&data).unwrap();
        assert!(out.iter().all(|v| *v == 0.0));
    }
}
