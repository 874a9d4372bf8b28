//! Error types for embedding and plotting operations

use thiserror::Error;

/// Errors raised while building embeddings or resolving plot geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// An axis specification was not supplied before plotting
    #[error("The `{0}` value cannot be None")]
    MissingAxis(&'static str),

    /// Integer axis points past the end of the vector
    #[error("dimension {index} out of range for '{name}' with {dim} dimensions")]
    DimensionOutOfRange {
        name: String,
        index: usize,
        dim: usize,
    },

    /// Two vectors that must share a dimensionality do not
    #[error("vector dimension mismatch: '{left}' has {left_dim}, '{right}' has {right_dim}")]
    DimensionMismatch {
        left: String,
        left_dim: usize,
        right: String,
        right_dim: usize,
    },

    /// Projection onto an embedding with zero norm
    #[error("cannot project onto zero vector '{0}'")]
    ZeroVector(String),

    /// Name already present in an embedding set
    #[error("duplicate embedding name: {0}")]
    DuplicateName(String),

    /// Name not present in an embedding set
    #[error("embedding not found: {0}")]
    UnknownEmbedding(String),

    /// Color string the parser does not recognise
    #[error("unknown color: {0}")]
    UnknownColor(String),

    /// Operation needs at least one embedding
    #[error("embedding set is empty")]
    EmptySet,

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for vecplot-core operations.
pub type Result<T> = std::result::Result<T, Error>;
