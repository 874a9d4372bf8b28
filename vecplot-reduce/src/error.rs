//! Error types for reduction adapters and the CLI.

use thiserror::Error;

/// Errors raised while transforming an embedding set.
#[derive(Debug, Error)]
pub enum ReduceError {
    /// Embedding or set construction failed
    #[error(transparent)]
    Core(#[from] vecplot_core::Error),

    /// The reduction backend rejected the data or failed internally.
    /// `message` is the backend's own text, unmodified.
    #[error("{backend} failed: {message}")]
    Backend { backend: String, message: String },

    /// Backend output does not line up with its input
    #[error("{backend} returned a {rows}x{cols} matrix, expected {expected_rows}x{expected_cols}")]
    OutputShape {
        backend: String,
        rows: usize,
        cols: usize,
        expected_rows: usize,
        expected_cols: usize,
    },

    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// Adapter or CLI configuration error
    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ReduceError {
    pub fn backend(backend: impl Into<String>, message: impl ToString) -> Self {
        ReduceError::Backend {
            backend: backend.into(),
            message: message.to_string(),
        }
    }
}

/// Result type alias for reduction operations.
pub type Result<T> = std::result::Result<T, ReduceError>;
