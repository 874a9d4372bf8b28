//! Axis resolution: turning axis specifications into 2D coordinates and labels.
//!
//! An axis is either a dimension index into the plotted vector or another
//! embedding. Index axes read the component directly and are labelled
//! `"Dimension {i}"`; embedding axes use [`Embedding::scalar_projection`] and
//! are labelled with the axis embedding's name.

use serde::{Deserialize, Serialize};

use crate::embedding::Embedding;
use crate::error::{Error, Result};

/// Where a plot axis gets its coordinate from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisSpec {
    Dimension(usize),
    Embedding(Embedding),
}

impl From<usize> for AxisSpec {
    fn from(index: usize) -> Self {
        AxisSpec::Dimension(index)
    }
}

impl From<Embedding> for AxisSpec {
    fn from(embedding: Embedding) -> Self {
        AxisSpec::Embedding(embedding)
    }
}

impl From<&Embedding> for AxisSpec {
    fn from(embedding: &Embedding) -> Self {
        AxisSpec::Embedding(embedding.clone())
    }
}

impl AxisSpec {
    /// Label shown when the caller does not supply one.
    pub fn default_label(&self) -> String {
        match self {
            AxisSpec::Dimension(i) => format!("Dimension {}", i),
            AxisSpec::Embedding(e) => e.name().to_string(),
        }
    }

    /// Coordinate of `target` along this axis.
    pub fn coordinate(&self, target: &Embedding) -> Result<f32> {
        match self {
            AxisSpec::Dimension(i) => target.component(*i),
            AxisSpec::Embedding(axis) => target.scalar_projection(axis),
        }
    }
}

/// Coordinates and labels for one embedding on a pair of axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAxes {
    pub x: f32,
    pub y: f32,
    pub x_label: String,
    pub y_label: String,
}

/// Resolve both axes for `target`.
///
/// Missing axes are reported before any coordinate is computed, `x_axis`
/// first. Explicit labels win over the computed defaults.
pub fn resolve_axes(
    target: &Embedding,
    x_axis: Option<&AxisSpec>,
    y_axis: Option<&AxisSpec>,
    x_label: Option<&str>,
    y_label: Option<&str>,
) -> Result<ResolvedAxes> {
    let x_axis = x_axis.ok_or(Error::MissingAxis("x_axis"))?;
    let y_axis = y_axis.ok_or(Error::MissingAxis("y_axis"))?;

    Ok(ResolvedAxes {
        x: x_axis.coordinate(target)?,
        y: y_axis.coordinate(target)?,
        x_label: x_label.map_or_else(|| x_axis.default_label(), str::to_string),
        y_label: y_label.map_or_else(|| y_axis.default_label(), str::to_string),
    })
}
