//! Paint attributes: colors, fill rules, per-element styles and the ambient
//! paint context they fall back to.
//!
//! Inheritance is explicit. A parent hands its [`PaintContext`] down, each
//! graphics element derives its children's context with
//! [`PaintContext::inherit`], and a path element resolves its own
//! [`PaintStyle`] against the context into a [`ResolvedPaint`] before the
//! render pipeline runs. The pipeline never looks at ancestors.

#[cfg(test)]
#[path = "paint_test.rs"]
mod paint_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_FILL, DEFAULT_STROKE_WIDTH};

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color: {0:?}")]
pub struct ColorParseError(pub String);

/// Non-premultiplied 8-bit RGBA color.
///
/// Serialized as a hex string (`"#rrggbb"`, or `"#rrggbbaa"` when translucent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// CSS `rgba()` form for Canvas2D style setters.
    #[must_use]
    pub fn to_css(&self) -> String {
        let alpha = (f64::from(self.a) / 255.0 * 1000.0).round() / 1000.0;
        format!("rgba({}, {}, {}, {alpha})", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if !self.is_opaque() {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa` and a handful of keywords.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let err = || ColorParseError(s.to_owned());

        match raw.to_ascii_lowercase().as_str() {
            "black" => return Ok(Self::BLACK),
            "white" => return Ok(Self::WHITE),
            "red" => return Ok(Self::rgb(255, 0, 0)),
            "green" => return Ok(Self::rgb(0, 128, 0)),
            "blue" => return Ok(Self::rgb(0, 0, 255)),
            "transparent" => return Ok(Self::TRANSPARENT),
            _ => {}
        }

        let hex = raw.strip_prefix('#').ok_or_else(err)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).map(|v| v * 17).map_err(|_| err());

        match hex.len() {
            3 => Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Inside/outside rule for filling self-intersecting paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillRule {
    /// Inside when a ray crosses an odd number of edges.
    #[default]
    EvenOdd,
    /// Inside when the signed winding number is non-zero.
    NonZero,
}

impl FromStr for FillRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "evenodd" => Ok(Self::EvenOdd),
            "nonzero" => Ok(Self::NonZero),
            other => Err(format!("unknown fill rule '{other}' (expected 'evenodd' or 'nonzero')")),
        }
    }
}

/// Paint attributes declared on one element. `None` means "inherit".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PaintStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

/// Ambient paint values in effect for an element's subtree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintContext {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: Option<f64>,
}

impl Default for PaintContext {
    /// Root context: black fill, no stroke, 1-unit stroke width.
    fn default() -> Self {
        Self { fill: Some(DEFAULT_FILL), stroke: None, stroke_width: Some(DEFAULT_STROKE_WIDTH) }
    }
}

impl PaintContext {
    /// A context with nothing to fall back to.
    #[must_use]
    pub fn empty() -> Self {
        Self { fill: None, stroke: None, stroke_width: None }
    }

    /// Context for the children of an element declaring `style`: explicit values
    /// replace the ambient ones, everything else carries through.
    #[must_use]
    pub fn inherit(&self, style: &PaintStyle) -> Self {
        Self {
            fill: style.fill.or(self.fill),
            stroke: style.stroke.or(self.stroke),
            stroke_width: style.stroke_width.or(self.stroke_width),
        }
    }

    /// Resolve an element's own style against this context.
    #[must_use]
    pub fn resolve(&self, style: &PaintStyle) -> ResolvedPaint {
        let inherited = self.inherit(style);
        ResolvedPaint { fill: inherited.fill, stroke: inherited.stroke, stroke_width: inherited.stroke_width }
    }
}

/// Paint channels handed to the render pipeline. An absent channel is not
/// painted.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResolvedPaint {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: Option<f64>,
}

impl ResolvedPaint {
    #[must_use]
    pub fn new(fill: Option<Color>, stroke: Option<Color>, stroke_width: Option<f64>) -> Self {
        Self { fill, stroke, stroke_width }
    }

    /// Fill color, if the fill channel is painted.
    #[must_use]
    pub fn fill_color(&self) -> Option<Color> {
        self.fill
    }

    /// Stroke color and width, if the stroke channel is painted. A stroke needs
    /// both, and a width that is finite and positive.
    #[must_use]
    pub fn stroke_paint(&self) -> Option<(Color, f64)> {
        let color = self.stroke?;
        let width = self.stroke_width?;
        if width.is_finite() && width > 0.0 { Some((color, width)) } else { None }
    }
}
