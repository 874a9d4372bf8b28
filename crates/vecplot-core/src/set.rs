//! Ordered, uniquely named collections of embeddings.

use std::collections::HashMap;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::axis::AxisSpec;
use crate::embedding::Embedding;
use crate::error::{Error, Result};

/// Label used when a set was built without a name.
pub const DEFAULT_SET_NAME: &str = "EmbSet";

/// A transformation from one embedding set to another.
///
/// Implemented by the dimensionality-reduction adapters; the set only knows
/// how to hand itself over.
pub trait Transformer {
    type Error;

    fn apply(&mut self, set: &EmbeddingSet) -> std::result::Result<EmbeddingSet, Self::Error>;
}

/// An ordered mapping from unique names to embeddings of one dimensionality.
///
/// Insertion order is preserved and is the row order of [`to_matrix`].
///
/// [`to_matrix`]: EmbeddingSet::to_matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SetDocument", into = "SetDocument")]
pub struct EmbeddingSet {
    name: Option<String>,
    embeddings: Vec<Embedding>,
    index: HashMap<String, usize>,
}

/// JSON shape of an embedding set.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SetDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    embeddings: Vec<Embedding>,
}

impl TryFrom<SetDocument> for EmbeddingSet {
    type Error = Error;

    fn try_from(doc: SetDocument) -> Result<Self> {
        let set = EmbeddingSet::from_embeddings(doc.embeddings)?;
        Ok(match doc.name {
            Some(name) => set.with_name(name),
            None => set,
        })
    }
}

impl From<EmbeddingSet> for SetDocument {
    fn from(set: EmbeddingSet) -> Self {
        SetDocument {
            name: set.name,
            embeddings: set.embeddings,
        }
    }
}

impl EmbeddingSet {
    /// Build a set, rejecting duplicate names and mixed dimensionality.
    pub fn from_embeddings(embeddings: impl IntoIterator<Item = Embedding>) -> Result<Self> {
        let mut set = Self {
            name: None,
            embeddings: Vec::new(),
            index: HashMap::new(),
        };
        for embedding in embeddings {
            set.push(embedding)?;
        }
        Ok(set)
    }

    /// Build a set from parallel names and matrix rows.
    pub fn from_matrix(names: &[String], matrix: &Array2<f32>) -> Result<Self> {
        if names.len() != matrix.nrows() {
            return Err(Error::InvalidInput(format!(
                "{} names for {} matrix rows",
                names.len(),
                matrix.nrows()
            )));
        }
        let embeddings = names
            .iter()
            .zip(matrix.rows())
            .map(|(name, row)| Embedding::new(name.clone(), row.to_vec()));
        Self::from_embeddings(embeddings)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn push(&mut self, embedding: Embedding) -> Result<()> {
        if self.index.contains_key(embedding.name()) {
            return Err(Error::DuplicateName(embedding.name().to_string()));
        }
        if let Some(first) = self.embeddings.first() {
            if first.dim() != embedding.dim() {
                return Err(Error::DimensionMismatch {
                    left: first.name().to_string(),
                    left_dim: first.dim(),
                    right: embedding.name().to_string(),
                    right_dim: embedding.dim(),
                });
            }
        }
        self.index
            .insert(embedding.name().to_string(), self.embeddings.len());
        self.embeddings.push(embedding);
        Ok(())
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name used when composing provenance strings.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_SET_NAME)
    }

    pub fn len(&self) -> usize {
        self.embeddings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.embeddings.is_empty()
    }

    /// Shared dimensionality, 0 for an empty set.
    pub fn dim(&self) -> usize {
        self.embeddings.first().map_or(0, Embedding::dim)
    }

    pub fn get(&self, name: &str) -> Option<&Embedding> {
        self.index.get(name).map(|&i| &self.embeddings[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Member embedding by name, or `UnknownEmbedding`.
    pub fn require(&self, name: &str) -> Result<&Embedding> {
        self.get(name)
            .ok_or_else(|| Error::UnknownEmbedding(name.to_string()))
    }

    /// Axis specification that projects onto the named member.
    pub fn axis(&self, name: &str) -> Result<AxisSpec> {
        Ok(AxisSpec::Embedding(self.require(name)?.clone()))
    }

    pub fn names(&self) -> Vec<String> {
        self.embeddings.iter().map(|e| e.name().to_string()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Embedding> {
        self.embeddings.iter()
    }

    /// Decompose into names and a row-per-embedding matrix.
    pub fn to_matrix(&self) -> Result<(Vec<String>, Array2<f32>)> {
        let flat: Vec<f32> = self
            .embeddings
            .iter()
            .flat_map(|e| e.vector().iter().copied())
            .collect();
        let matrix = Array2::from_shape_vec((self.len(), self.dim()), flat)
            .map_err(|e| Error::InvalidInput(format!("matrix shape: {}", e)))?;
        Ok((self.names(), matrix))
    }

    /// Union of two sets. Entries of `other` replace same-named entries in
    /// place; new names are appended.
    pub fn merge(&self, other: &EmbeddingSet) -> Result<EmbeddingSet> {
        let mut embeddings = self.embeddings.clone();
        for emb in other.iter() {
            match self.index.get(emb.name()) {
                Some(&i) => embeddings[i] = emb.clone(),
                None => embeddings.push(emb.clone()),
            }
        }
        let merged = Self::from_embeddings(embeddings)?;
        Ok(match &self.name {
            Some(name) => merged.with_name(name.clone()),
            None => merged,
        })
    }

    /// Apply `f` to every member, producing a new set.
    pub fn operate<F>(&self, mut f: F) -> Result<EmbeddingSet>
    where
        F: FnMut(&Embedding) -> Result<Embedding>,
    {
        let embeddings = self.embeddings.iter().map(&mut f).collect::<Result<Vec<_>>>()?;
        let out = Self::from_embeddings(embeddings)?;
        Ok(match &self.name {
            Some(name) => out.with_name(name.clone()),
            None => out,
        })
    }

    /// Run a transformer over this set.
    pub fn transform<T: Transformer>(
        &self,
        transformer: &mut T,
    ) -> std::result::Result<EmbeddingSet, T::Error> {
        transformer.apply(self)
    }
}

impl<'a> IntoIterator for &'a EmbeddingSet {
    type Item = &'a Embedding;
    type IntoIter = std::slice::Iter<'a, Embedding>;

    fn into_iter(self) -> Self::IntoIter {
        self.embeddings.iter()
    }
}
