//! vecplot core
//!
//! Named embedding vectors, ordered embedding sets, and the 2D geometry used
//! to draw them.
//!
//! - **embedding**: `Embedding` and its arithmetic (add, sub, projection, rejection)
//! - **set**: `EmbeddingSet`, an ordered uniquely-named collection, plus the
//!   `Transformer` seam used by reduction adapters
//! - **axis**: axis specifications (dimension index or another embedding) and
//!   their resolution into coordinates and labels
//! - **plot**: scatter/arrow/text views on a `Renderer`, the recording `Canvas`,
//!   colors and SVG output
//!
//! # Example
//!
//! ```rust
//! use vecplot_core::{Embedding, EmbeddingSet};
//! use vecplot_core::plot::{Canvas, PlotKind, PlotOptions};
//!
//! let set = EmbeddingSet::from_embeddings(vec![
//!     Embedding::new("man", vec![1.0, 0.2]),
//!     Embedding::new("woman", vec![0.9, 0.8]),
//! ])
//! .unwrap();
//!
//! let mut canvas = Canvas::new();
//! let options = PlotOptions::new(PlotKind::Arrow)
//!     .x_axis(set.axis("man").unwrap())
//!     .y_axis(1);
//! set.plot(&mut canvas, &options).unwrap();
//! assert_eq!(canvas.arrows().len(), 2);
//! assert_eq!(canvas.x_label, "man");
//! ```

pub mod axis;
pub mod embedding;
pub mod error;
pub mod plot;
pub mod set;
pub mod similarity;

pub use axis::{resolve_axes, AxisSpec, ResolvedAxes};
pub use embedding::Embedding;
pub use error::{Error, Result};
pub use set::{EmbeddingSet, Transformer, DEFAULT_SET_NAME};
pub use similarity::Metric;
