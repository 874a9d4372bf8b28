//! Named embedding vectors and their arithmetic.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::similarity::{self, Metric};

/// A name paired with a fixed-length vector.
///
/// Embeddings are immutable; every arithmetic operation returns a new
/// embedding whose name records how it was derived, e.g. `"(king - man)"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    name: String,
    vector: Vec<f32>,
}

impl Embedding {
    pub fn new(name: impl Into<String>, vector: impl Into<Vec<f32>>) -> Self {
        Self {
            name: name.into(),
            vector: vector.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vector(&self) -> &[f32] {
        &self.vector
    }

    /// Number of dimensions.
    pub fn dim(&self) -> usize {
        self.vector.len()
    }

    /// Same vector under a different name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self::new(name, self.vector.clone())
    }

    /// Value at dimension `index`.
    pub fn component(&self, index: usize) -> Result<f32> {
        self.vector
            .get(index)
            .copied()
            .ok_or_else(|| Error::DimensionOutOfRange {
                name: self.name.clone(),
                index,
                dim: self.dim(),
            })
    }

    /// L2 norm of the vector.
    pub fn norm(&self) -> f32 {
        similarity::dot(&self.vector, &self.vector).sqrt()
    }

    fn check_dim(&self, other: &Embedding) -> Result<()> {
        if self.dim() != other.dim() {
            return Err(Error::DimensionMismatch {
                left: self.name.clone(),
                left_dim: self.dim(),
                right: other.name.clone(),
                right_dim: other.dim(),
            });
        }
        Ok(())
    }

    pub fn add(&self, other: &Embedding) -> Result<Embedding> {
        self.check_dim(other)?;
        let vector = self
            .vector
            .iter()
            .zip(&other.vector)
            .map(|(a, b)| a + b)
            .collect::<Vec<_>>();
        Ok(Self::new(format!("({} + {})", self.name, other.name), vector))
    }

    pub fn sub(&self, other: &Embedding) -> Result<Embedding> {
        self.check_dim(other)?;
        let vector = self
            .vector
            .iter()
            .zip(&other.vector)
            .map(|(a, b)| a - b)
            .collect::<Vec<_>>();
        Ok(Self::new(format!("({} - {})", self.name, other.name), vector))
    }

    /// Length of this vector along the direction of `other`, in units of
    /// `other`: `(self · other) / (other · other)`.
    ///
    /// This is the coordinate an axis takes when the axis is itself an
    /// embedding.
    pub fn scalar_projection(&self, other: &Embedding) -> Result<f32> {
        self.check_dim(other)?;
        let denom = similarity::dot(&other.vector, &other.vector);
        if denom == 0.0 {
            return Err(Error::ZeroVector(other.name.clone()));
        }
        Ok(similarity::dot(&self.vector, &other.vector) / denom)
    }

    /// Component of this vector that lies along `other`.
    pub fn project(&self, other: &Embedding) -> Result<Embedding> {
        let scale = self.scalar_projection(other)?;
        let vector = other.vector.iter().map(|v| v * scale).collect::<Vec<_>>();
        Ok(Self::new(format!("({} >> {})", self.name, other.name), vector))
    }

    /// Component of this vector orthogonal to `other`.
    pub fn reject(&self, other: &Embedding) -> Result<Embedding> {
        let scale = self.scalar_projection(other)?;
        let vector = self
            .vector
            .iter()
            .zip(&other.vector)
            .map(|(a, b)| a - b * scale)
            .collect::<Vec<_>>();
        Ok(Self::new(format!("({} | {})", self.name, other.name), vector))
    }

    pub fn distance(&self, other: &Embedding, metric: Metric) -> Result<f32> {
        self.check_dim(other)?;
        Ok(similarity::distance(&self.vector, &other.vector, metric))
    }
}
