//! Slice-level vector math shared by embeddings and axis resolution.
//!
//! Callers are expected to have checked dimensionality already; these
//! functions panic on length mismatch.

use serde::{Deserialize, Serialize};

/// Distance metric between two embeddings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Cosine,
    Euclidean,
}

fn check_len(a: &[f32], b: &[f32]) {
    assert_eq!(
        a.len(),
        b.len(),
        "vector dimension mismatch: {} vs {}",
        a.len(),
        b.len()
    );
}

/// Dot product of two f32 slices.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    check_len(a, b);
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Cosine similarity between two f32 slices.
///
/// Returns 0.0 if either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    check_len(a, b);

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for i in 0..a.len() {
        dot += a[i] * b[i];
        norm_a += a[i] * a[i];
        norm_b += b[i] * b[i];
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        return 0.0;
    }

    dot / denom
}

/// Euclidean (L2) distance between two f32 slices.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    check_len(a, b);
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

/// Distance under the given metric. Cosine distance is `1 - similarity`.
pub fn distance(a: &[f32], b: &[f32], metric: Metric) -> f32 {
    match metric {
        Metric::Cosine => 1.0 - cosine_similarity(a, b),
        Metric::Euclidean => euclidean_distance(a, b),
    }
}
