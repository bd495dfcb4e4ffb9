//! Shared numeric constants for the svgpaint crate.

use crate::paint::Color;

// ── Geometry ────────────────────────────────────────────────────

/// Tolerance for treating two coordinates as the same point.
pub const POINT_EPSILON: f64 = 1e-9;

/// Largest angular sweep covered by a single cubic when flattening arcs (90°).
pub const MAX_ARC_SEGMENT_SWEEP: f64 = std::f64::consts::FRAC_PI_2;

// ── Paint defaults ──────────────────────────────────────────────

/// Initial fill of the root paint context (SVG's initial `fill` is black).
pub const DEFAULT_FILL: Color = Color::BLACK;

/// Initial stroke width of the root paint context, in user units.
pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;

// ── Environment ─────────────────────────────────────────────────

/// Env var selecting the fill rule (`evenodd` or `nonzero`).
pub const ENV_FILL_RULE: &str = "SVGPAINT_FILL_RULE";

/// Env var selecting the arc flag policy (`preserve` or `force_cleared`).
pub const ENV_ARC_FLAGS: &str = "SVGPAINT_ARC_FLAGS";

/// Env var toggling anti-aliasing on raster backends.
pub const ENV_ANTI_ALIAS: &str = "SVGPAINT_ANTI_ALIAS";
