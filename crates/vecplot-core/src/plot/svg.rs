//! Standalone SVG output for a recorded canvas.

use std::fmt::Write;

use super::canvas::{Artifact, Canvas};

const MARGIN: f32 = 48.0;
const POINT_RADIUS: f32 = 4.0;

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Maps data coordinates onto the drawable area, y pointing up.
struct Viewport {
    min_x: f32,
    min_y: f32,
    scale_x: f32,
    scale_y: f32,
    height: f32,
}

impl Viewport {
    fn new(canvas: &Canvas, width: f32, height: f32) -> Self {
        let (min_x, min_y, max_x, max_y) = canvas.bounds();
        let span_x = (max_x - min_x).max(f32::EPSILON);
        let span_y = (max_y - min_y).max(f32::EPSILON);
        let mut scale_x = (width - 2.0 * MARGIN) / span_x;
        let mut scale_y = (height - 2.0 * MARGIN) / span_y;

        // A fixed aspect ties the two scales together.
        if let Some(ratio) = canvas.aspect.value() {
            let unit = scale_x.min(scale_y / ratio);
            scale_x = unit;
            scale_y = unit * ratio;
        }

        Self {
            min_x,
            min_y,
            scale_x,
            scale_y,
            height,
        }
    }

    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        (
            MARGIN + (x - self.min_x) * self.scale_x,
            self.height - MARGIN - (y - self.min_y) * self.scale_y,
        )
    }
}

/// Render `canvas` as an SVG document of the given pixel size.
pub fn render(canvas: &Canvas, width: u32, height: u32) -> String {
    let (w, h) = (width as f32, height as f32);
    let view = Viewport::new(canvas, w, h);
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    let _ = writeln!(
        out,
        r#"<defs><marker id="head" markerWidth="8" markerHeight="8" refX="7" refY="4" orient="auto"><path d="M0,0 L8,4 L0,8 z" fill="context-stroke"/></marker></defs>"#
    );
    let _ = writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#);

    let (ox, oy) = view.map(0.0, 0.0);
    for artifact in &canvas.artifacts {
        match artifact {
            Artifact::Point { x, y, color } => {
                let (px, py) = view.map(*x, *y);
                let _ = writeln!(
                    out,
                    r#"<circle cx="{px:.2}" cy="{py:.2}" r="{POINT_RADIUS}" fill="{}" fill-opacity="{:.3}"/>"#,
                    color.to_hex(),
                    color.alpha()
                );
            }
            Artifact::Arrow { u, v, color } => {
                let (px, py) = view.map(*u, *v);
                let _ = writeln!(
                    out,
                    r#"<line x1="{ox:.2}" y1="{oy:.2}" x2="{px:.2}" y2="{py:.2}" stroke="{}" stroke-opacity="{:.3}" stroke-width="2" marker-end="url(#head)"/>"#,
                    color.to_hex(),
                    color.alpha()
                );
            }
            Artifact::Text { x, y, text } => {
                let (px, py) = view.map(*x, *y);
                let _ = writeln!(
                    out,
                    r#"<text x="{px:.2}" y="{py:.2}" font-family="sans-serif" font-size="12">{}</text>"#,
                    escape(text)
                );
            }
        }
    }

    if !canvas.title.is_empty() {
        let _ = writeln!(
            out,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-family="sans-serif" font-size="14">{}</text>"#,
            w / 2.0,
            MARGIN / 2.0,
            escape(&canvas.title)
        );
    }
    if !canvas.x_label.is_empty() {
        let _ = writeln!(
            out,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-family="sans-serif" font-size="12">{}</text>"#,
            w / 2.0,
            h - MARGIN / 4.0,
            escape(&canvas.x_label)
        );
    }
    if !canvas.y_label.is_empty() {
        let _ = writeln!(
            out,
            r#"<text transform="translate({:.2},{:.2}) rotate(-90)" text-anchor="middle" font-family="sans-serif" font-size="12">{}</text>"#,
            MARGIN / 3.0,
            h / 2.0,
            escape(&canvas.y_label)
        );
    }

    out.push_str("</svg>\n");
    out
}
