//! `viewBox` transform: maps path geometry from an `<svg>` root's user space into
//! layout space.
//!
//! The mapping is a uniform scale about the view box's min corner:
//! `p' = scale * (p - origin)`. Using one factor for both axes keeps the aspect
//! ratio; `preserveAspectRatio` alignment and non-uniform scaling are not
//! modelled.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geom::Point;
use crate::path::{Path, Segment};

/// The `viewBox` rectangle declared on an `<svg>` root.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    #[must_use]
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self { min_x, min_y, width, height }
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.min_x, self.min_y)
    }
}

/// Error returned by [`resolve_transform`].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ViewportError {
    /// An explicit render dimension was given for an axis whose view-box
    /// extent is zero, negative or not finite.
    #[error("degenerate viewport: view box is {width}x{height}")]
    DegenerateViewport { width: f64, height: f64 },
}

/// How arc flags are treated when a path is rewritten under a transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArcFlagPolicy {
    /// Keep `large_arc` and `sweep` as authored. Both flags are invariant under
    /// a uniform positive scale, so this is the geometrically correct rewrite.
    #[default]
    Preserve,
    /// Force both flags to `false`, matching legacy renderers that rebuilt
    /// arcs without them. Arcs that needed the large or positive-sweep
    /// solution come out on the wrong side of their chord.
    ForceCleared,
}

impl FromStr for ArcFlagPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preserve" => Ok(Self::Preserve),
            "force_cleared" => Ok(Self::ForceCleared),
            other => Err(format!("unknown arc flag policy '{other}' (expected 'preserve' or 'force_cleared')")),
        }
    }
}

/// Uniform scale plus origin shift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    pub scale: f64,
    pub origin: Point,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewportTransform {
    pub const IDENTITY: Self = Self { scale: 1.0, origin: Point::ORIGIN };

    #[must_use]
    pub fn new(scale: f64, origin: Point) -> Self {
        Self { scale, origin }
    }

    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_identity(&self) -> bool {
        self.scale == 1.0 && self.origin == Point::ORIGIN
    }

    /// Map one point: shift by `-origin`, then scale.
    #[must_use]
    pub fn apply(&self, point: Point) -> Point {
        (point - self.origin).scaled(self.scale)
    }

    /// Rewrite every segment of `path` into layout space.
    ///
    /// End points and control points go through [`Self::apply`]; arc radii are
    /// multiplied by the scale; arc rotation passes through; arc flags follow
    /// `arc_flags`. `Invalid` segments are dropped.
    #[must_use]
    pub fn apply_to_path(&self, path: &Path, arc_flags: ArcFlagPolicy) -> Path {
        path.segments()
            .iter()
            .filter(|segment| !matches!(segment, Segment::Invalid))
            .map(|segment| {
                let mapped = segment.map_points(|p| self.apply(p));
                match mapped {
                    Segment::EllipticalArcTo { to, radii, x_axis_rotation, large_arc, sweep } => {
                        let (large_arc, sweep) = match arc_flags {
                            ArcFlagPolicy::Preserve => (large_arc, sweep),
                            ArcFlagPolicy::ForceCleared => (false, false),
                        };
                        Segment::EllipticalArcTo { to, radii: radii.scaled(self.scale), x_axis_rotation, large_arc, sweep }
                    }
                    other => other,
                }
            })
            .collect()
    }
}

/// Compute the transform for content inside an `<svg>` root.
///
/// Without a view box the transform is the identity. Otherwise the origin is
/// the view box's min corner and the scale is the smaller of the per-axis
/// ratios `render / viewBox`, where an axis without an explicit render
/// dimension contributes `1.0`.
///
/// # Errors
///
/// Returns [`ViewportError::DegenerateViewport`] when a render dimension is
/// present but the matching view-box extent cannot divide it.
pub fn resolve_transform(
    view_box: Option<&ViewBox>,
    render_width: Option<f64>,
    render_height: Option<f64>,
) -> Result<ViewportTransform, ViewportError> {
    let Some(vb) = view_box else {
        return Ok(ViewportTransform::IDENTITY);
    };
    let degenerate = || ViewportError::DegenerateViewport { width: vb.width, height: vb.height };

    let scale_x = axis_scale(render_width, vb.width).ok_or_else(degenerate)?;
    let scale_y = axis_scale(render_height, vb.height).ok_or_else(degenerate)?;

    Ok(ViewportTransform { scale: scale_x.min(scale_y), origin: vb.origin() })
}

/// [`resolve_transform`], recovering from a degenerate viewport by keeping the
/// view-box origin with a scale of `1.0`.
#[must_use]
pub fn resolve_transform_or_unit_scale(
    view_box: Option<&ViewBox>,
    render_width: Option<f64>,
    render_height: Option<f64>,
) -> ViewportTransform {
    match resolve_transform(view_box, render_width, render_height) {
        Ok(transform) => transform,
        Err(err) => {
            tracing::warn!(error = %err, "falling back to unit viewport scale");
            ViewportTransform { scale: 1.0, origin: view_box.map_or(Point::ORIGIN, ViewBox::origin) }
        }
    }
}

fn axis_scale(render: Option<f64>, extent: f64) -> Option<f64> {
    let Some(render) = render else {
        return Some(1.0);
    };
    if !(extent.is_finite() && extent > 0.0) {
        return None;
    }
    let scale = render / extent;
    scale.is_finite().then_some(scale)
}
