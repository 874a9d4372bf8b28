//! Rendering seam and the in-memory canvas that records what was drawn.

use serde::{Deserialize, Serialize};

use super::color::Rgba;

/// Axis scaling of a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aspect {
    #[default]
    Auto,
    Equal,
    Ratio(f32),
}

impl Aspect {
    /// Numeric ratio, `None` for `Auto`.
    pub fn value(&self) -> Option<f32> {
        match self {
            Aspect::Auto => None,
            Aspect::Equal => Some(1.0),
            Aspect::Ratio(r) => Some(*r),
        }
    }
}

impl std::str::FromStr for Aspect {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "auto" => Ok(Aspect::Auto),
            "equal" => Ok(Aspect::Equal),
            other => other
                .parse::<f32>()
                .ok()
                .filter(|r| r.is_finite() && *r > 0.0)
                .map(Aspect::Ratio)
                .ok_or_else(|| crate::Error::InvalidInput(format!("invalid aspect: {}", other))),
        }
    }
}

/// Operations a plotting backend must accept.
pub trait Renderer {
    fn draw_point(&mut self, x: f32, y: f32, color: Rgba);

    /// Arrow from the origin with components `(u, v)`.
    fn draw_arrow(&mut self, u: f32, v: f32, color: Rgba);

    fn draw_text(&mut self, x: f32, y: f32, text: &str);

    fn set_x_label(&mut self, label: &str);

    fn set_y_label(&mut self, label: &str);

    fn set_title(&mut self, title: &str);

    fn set_aspect(&mut self, aspect: Aspect);
}

/// One drawn element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Artifact {
    Point { x: f32, y: f32, color: Rgba },
    Arrow { u: f32, v: f32, color: Rgba },
    Text { x: f32, y: f32, text: String },
}

/// Recording renderer. Holds artifacts in draw order plus axis settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub artifacts: Vec<Artifact>,
    pub x_label: String,
    pub y_label: String,
    pub title: String,
    pub aspect: Aspect,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(x, y, color)` of every point.
    pub fn points(&self) -> Vec<(f32, f32, Rgba)> {
        self.artifacts
            .iter()
            .filter_map(|a| match a {
                Artifact::Point { x, y, color } => Some((*x, *y, *color)),
                _ => None,
            })
            .collect()
    }

    /// `(u, v, color)` of every arrow.
    pub fn arrows(&self) -> Vec<(f32, f32, Rgba)> {
        self.artifacts
            .iter()
            .filter_map(|a| match a {
                Artifact::Arrow { u, v, color } => Some((*u, *v, *color)),
                _ => None,
            })
            .collect()
    }

    /// `(x, y, text)` of every annotation.
    pub fn texts(&self) -> Vec<(f32, f32, &str)> {
        self.artifacts
            .iter()
            .filter_map(|a| match a {
                Artifact::Text { x, y, text } => Some((*x, *y, text.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Smallest box containing every artifact and the origin.
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        let mut bounds = (0.0f32, 0.0f32, 0.0f32, 0.0f32);
        let mut include = |x: f32, y: f32| {
            bounds.0 = bounds.0.min(x);
            bounds.1 = bounds.1.min(y);
            bounds.2 = bounds.2.max(x);
            bounds.3 = bounds.3.max(y);
        };
        for artifact in &self.artifacts {
            match artifact {
                Artifact::Point { x, y, .. } | Artifact::Text { x, y, .. } => include(*x, *y),
                Artifact::Arrow { u, v, .. } => include(*u, *v),
            }
        }
        bounds
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl Renderer for Canvas {
    fn draw_point(&mut self, x: f32, y: f32, color: Rgba) {
        self.artifacts.push(Artifact::Point { x, y, color });
    }

    fn draw_arrow(&mut self, u: f32, v: f32, color: Rgba) {
        self.artifacts.push(Artifact::Arrow { u, v, color });
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str) {
        self.artifacts.push(Artifact::Text {
            x,
            y,
            text: text.to_string(),
        });
    }

    fn set_x_label(&mut self, label: &str) {
        self.x_label = label.to_string();
    }

    fn set_y_label(&mut self, label: &str) {
        self.y_label = label.to_string();
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_aspect(&mut self, aspect: Aspect) {
        self.aspect = aspect;
    }
}
