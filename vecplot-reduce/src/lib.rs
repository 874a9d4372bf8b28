//! Dimensionality reduction for embedding sets.
//!
//! [`Reducer`] adapts a [`ReductionBackend`] to the
//! [`vecplot_core::Transformer`] seam: the set goes in as a matrix, the
//! reduced set comes back with the same names plus one-hot basis embeddings
//! for the new axes.
//!
//! # Example
//!
//! ```rust
//! use vecplot_core::{Embedding, EmbeddingSet};
//! use vecplot_reduce::{Pca, Reducer};
//!
//! let set = EmbeddingSet::from_embeddings(vec![
//!     Embedding::new("a", vec![1.0, 0.0, 0.5]),
//!     Embedding::new("b", vec![0.0, 1.0, 0.5]),
//!     Embedding::new("c", vec![1.0, 1.0, 0.0]),
//! ])
//! .unwrap()
//! .with_name("demo");
//!
//! let mut pca = Reducer::new(Pca::new(), 2);
//! let reduced = set.transform(&mut pca).unwrap();
//! assert_eq!(reduced.name(), Some("demo.pca(2)"));
//! assert_eq!(reduced.names(), vec!["a", "b", "c", "pca_0", "pca_1"]);
//! ```

pub mod adapter;
pub mod backend;
pub mod cli;
pub mod error;
pub mod options;

pub use adapter::{Reducer, DEFAULT_COMPONENTS};
pub use backend::{Pca, ReductionBackend};
#[cfg(feature = "python")]
pub use backend::PythonEstimator;
pub use error::{ReduceError, Result};
pub use options::{neighbour_defaults, TransformOptions};
