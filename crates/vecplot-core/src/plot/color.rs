//! Color names and hex strings to RGBA.
//!
//! Accepts the matplotlib spellings people actually pass: CSS names,
//! single-letter shorthands, the `tab:` palette and `#rrggbb[aa]`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// RGBA with every channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba(pub [f32; 4]);

impl Rgba {
    pub fn red(&self) -> f32 {
        self.0[0]
    }

    pub fn green(&self) -> f32 {
        self.0[1]
    }

    pub fn blue(&self) -> f32 {
        self.0[2]
    }

    pub fn alpha(&self) -> f32 {
        self.0[3]
    }

    /// `#rrggbb` form, alpha dropped.
    pub fn to_hex(&self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            byte(self.red()),
            byte(self.green()),
            byte(self.blue())
        )
    }
}

impl std::str::FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_color(s)
    }
}

const BASE_COLORS: &[(&str, [f32; 3])] = &[
    ("b", [0.0, 0.0, 1.0]),
    ("g", [0.0, 0.5, 0.0]),
    ("r", [1.0, 0.0, 0.0]),
    ("c", [0.0, 0.75, 0.75]),
    ("m", [0.75, 0.0, 0.75]),
    ("y", [0.75, 0.75, 0.0]),
    ("k", [0.0, 0.0, 0.0]),
    ("w", [1.0, 1.0, 1.0]),
];

const NAMED_COLORS: &[(&str, &str)] = &[
    ("black", "#000000"),
    ("white", "#ffffff"),
    ("red", "#ff0000"),
    ("green", "#008000"),
    ("blue", "#0000ff"),
    ("yellow", "#ffff00"),
    ("cyan", "#00ffff"),
    ("magenta", "#ff00ff"),
    ("orange", "#ffa500"),
    ("purple", "#800080"),
    ("pink", "#ffc0cb"),
    ("brown", "#a52a2a"),
    ("gray", "#808080"),
    ("grey", "#808080"),
    ("lightgray", "#d3d3d3"),
    ("darkgray", "#a9a9a9"),
    ("navy", "#000080"),
    ("teal", "#008080"),
    ("olive", "#808000"),
    ("maroon", "#800000"),
    ("lime", "#00ff00"),
    ("gold", "#ffd700"),
    ("salmon", "#fa8072"),
    ("tomato", "#ff6347"),
    ("crimson", "#dc143c"),
    ("indigo", "#4b0082"),
    ("violet", "#ee82ee"),
    ("steelblue", "#4682b4"),
    ("skyblue", "#87ceeb"),
    ("lightblue", "#add8e6"),
    ("darkblue", "#00008b"),
    ("darkgreen", "#006400"),
    ("forestgreen", "#228b22"),
    ("seagreen", "#2e8b57"),
    ("darkred", "#8b0000"),
    ("darkorange", "#ff8c00"),
    ("slategray", "#708090"),
    ("tab:blue", "#1f77b4"),
    ("tab:orange", "#ff7f0e"),
    ("tab:green", "#2ca02c"),
    ("tab:red", "#d62728"),
    ("tab:purple", "#9467bd"),
    ("tab:brown", "#8c564b"),
    ("tab:pink", "#e377c2"),
    ("tab:gray", "#7f7f7f"),
    ("tab:olive", "#bcbd22"),
    ("tab:cyan", "#17becf"),
];

fn parse_hex(hex: &str) -> Option<Rgba> {
    let digits = hex.strip_prefix('#')?;
    if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .ok()
            .map(|v| v as f32 / 255.0)
    };
    let alpha = if digits.len() == 8 { channel(6)? } else { 1.0 };
    Some(Rgba([channel(0)?, channel(2)?, channel(4)?, alpha]))
}

/// Parse a color specification into RGBA.
pub fn parse_color(spec: &str) -> Result<Rgba> {
    let spec = spec.trim();
    let lower = spec.to_ascii_lowercase();

    if lower.starts_with('#') {
        return parse_hex(&lower).ok_or_else(|| Error::UnknownColor(spec.to_string()));
    }

    // Single letters are case-sensitive in matplotlib.
    if let Some((_, [r, g, b])) = BASE_COLORS.iter().find(|(name, _)| *name == spec) {
        return Ok(Rgba([*r, *g, *b, 1.0]));
    }

    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .and_then(|(_, hex)| parse_hex(hex))
        .ok_or_else(|| Error::UnknownColor(spec.to_string()))
}
