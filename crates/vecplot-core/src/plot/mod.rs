//! Scatter, arrow and text views of embeddings.
//!
//! Each plot call resolves the two axes for one embedding (see
//! [`crate::axis`]) and draws a single artifact onto a [`Renderer`]:
//!
//! - `Scatter`: a point at `(x, y)`, annotated with the name at the point
//! - `Arrow`: an arrow from the origin with `(U, V) = (x, y)`, annotated
//!   just past the tip
//! - `Text`: only the name, just right of `(x, y)`
//!
//! Axis labels, title and aspect are set on the renderer on every call.
//!
//! # Example
//!
//! ```rust
//! use vecplot_core::plot::{Canvas, PlotKind, PlotOptions};
//! use vecplot_core::Embedding;
//!
//! let red = Embedding::new("red", vec![0.2, 0.4, 0.6]);
//! let mut canvas = Canvas::new();
//! red.plot(&mut canvas, &PlotOptions::new(PlotKind::Scatter).x_axis(0).y_axis(1))
//!     .unwrap();
//! assert_eq!(canvas.x_label, "Dimension 0");
//! assert_eq!(canvas.texts()[0].2, "red");
//! ```

mod canvas;
mod color;
pub mod svg;

pub use canvas::{Artifact, Aspect, Canvas, Renderer};
pub use color::{parse_color, Rgba};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::axis::{resolve_axes, AxisSpec, ResolvedAxes};
use crate::embedding::Embedding;
use crate::error::{Error, Result};
use crate::set::EmbeddingSet;

/// Offset between an artifact and its name annotation.
pub const TEXT_OFFSET: f32 = 0.01;

pub const DEFAULT_SCATTER_COLOR: &str = "steelblue";
pub const DEFAULT_ARROW_COLOR: &str = "steelblue";

/// Which artifact a plot call draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotKind {
    Scatter,
    #[default]
    Arrow,
    Text,
}

impl std::str::FromStr for PlotKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "scatter" => Ok(PlotKind::Scatter),
            "arrow" => Ok(PlotKind::Arrow),
            "text" => Ok(PlotKind::Text),
            other => Err(Error::InvalidInput(format!(
                "unknown plot kind '{}', expected one of: scatter, arrow, text",
                other
            ))),
        }
    }
}

/// Plot configuration.
///
/// Both axes start unset; plotting without them fails with
/// [`Error::MissingAxis`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    pub kind: PlotKind,
    pub x_axis: Option<AxisSpec>,
    pub y_axis: Option<AxisSpec>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub title: String,
    /// `None` picks the per-kind default.
    pub color: Option<String>,
    /// Draw the embedding name next to points and arrows.
    pub annotate: bool,
    pub aspect: Aspect,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            kind: PlotKind::default(),
            x_axis: None,
            y_axis: None,
            x_label: None,
            y_label: None,
            title: String::new(),
            color: None,
            annotate: true,
            aspect: Aspect::Auto,
        }
    }
}

impl PlotOptions {
    pub fn new(kind: PlotKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn x_axis(mut self, axis: impl Into<AxisSpec>) -> Self {
        self.x_axis = Some(axis.into());
        self
    }

    pub fn y_axis(mut self, axis: impl Into<AxisSpec>) -> Self {
        self.y_axis = Some(axis.into());
        self
    }

    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn annotate(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    pub fn aspect(mut self, aspect: Aspect) -> Self {
        self.aspect = aspect;
        self
    }

    /// Color for points and arrows. Text mode draws neither, so its color
    /// is not read.
    fn resolved_color(&self) -> Result<Option<Rgba>> {
        let default = match self.kind {
            PlotKind::Scatter => DEFAULT_SCATTER_COLOR,
            PlotKind::Arrow => DEFAULT_ARROW_COLOR,
            PlotKind::Text => return Ok(None),
        };
        parse_color(self.color.as_deref().unwrap_or(default)).map(Some)
    }

    fn resolve(&self, embedding: &Embedding) -> Result<ResolvedAxes> {
        resolve_axes(
            embedding,
            self.x_axis.as_ref(),
            self.y_axis.as_ref(),
            self.x_label.as_deref(),
            self.y_label.as_deref(),
        )
    }
}

fn draw<R: Renderer>(
    renderer: &mut R,
    embedding: &Embedding,
    axes: &ResolvedAxes,
    options: &PlotOptions,
    color: Option<Rgba>,
) {
    let (x, y) = (axes.x, axes.y);
    match (options.kind, color) {
        (PlotKind::Scatter, Some(color)) => {
            renderer.draw_point(x, y, color);
            if options.annotate {
                renderer.draw_text(x, y, embedding.name());
            }
        }
        (PlotKind::Arrow, Some(color)) => {
            renderer.draw_arrow(x, y, color);
            if options.annotate {
                renderer.draw_text(x + TEXT_OFFSET, y + TEXT_OFFSET, embedding.name());
            }
        }
        (PlotKind::Text, _) => {
            renderer.draw_text(x + TEXT_OFFSET, y, embedding.name());
        }
        (PlotKind::Scatter | PlotKind::Arrow, None) => {}
    }
}

fn finish<R: Renderer>(renderer: &mut R, axes: &ResolvedAxes, options: &PlotOptions) {
    renderer.set_x_label(&axes.x_label);
    renderer.set_y_label(&axes.y_label);
    renderer.set_title(&options.title);
    renderer.set_aspect(options.aspect);
}

impl Embedding {
    /// Draw this embedding onto `renderer`.
    ///
    /// Nothing is drawn unless both axes resolve and, for scatter and arrow
    /// plots, the color parses.
    pub fn plot<R: Renderer>(&self, renderer: &mut R, options: &PlotOptions) -> Result<()> {
        let axes = options.resolve(self)?;
        let color = options.resolved_color()?;
        debug!(
            "plot {:?} '{}' at ({}, {})",
            options.kind,
            self.name(),
            axes.x,
            axes.y
        );
        draw(renderer, self, &axes, options, color);
        finish(renderer, &axes, options);
        Ok(())
    }
}

impl EmbeddingSet {
    /// Draw every member onto one renderer.
    ///
    /// All members are resolved before the first artifact is drawn, so a
    /// failure leaves the renderer untouched. Labels come from the axis
    /// specifications, which are shared by every member.
    pub fn plot<R: Renderer>(&self, renderer: &mut R, options: &PlotOptions) -> Result<()> {
        if self.is_empty() {
            return Err(Error::EmptySet);
        }
        let color = options.resolved_color()?;

        let resolved = self
            .iter()
            .map(|e| options.resolve(e).map(|axes| (e, axes)))
            .collect::<Result<Vec<_>>>()?;

        for (embedding, axes) in &resolved {
            draw(renderer, embedding, axes, options, color);
        }
        debug!(
            "plot {:?} for {} embeddings of '{}'",
            options.kind,
            resolved.len(),
            self.display_name()
        );

        if let Some((_, axes)) = resolved.first() {
            finish(renderer, axes, options);
        }
        Ok(())
    }
}
