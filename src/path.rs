//! Path model: an ordered sequence of typed segments forming one or more subpaths.
//!
//! Segment order is significant: it is the drawing order, and every `MoveTo`
//! starts a new subpath. Paths are built append-only; the only in-place edit is
//! [`Path::close`], which fill rendering relies on.

#[cfg(test)]
#[path = "path_test.rs"]
mod path_test;

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::geom::{Point, Radii};

/// One segment of a path. The variant set is closed; every algorithm over
/// segments is a `match`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    /// Placeholder that valid geometry never produces. Skipped everywhere.
    Invalid,
    /// Starts a new subpath at `to`.
    MoveTo { to: Point },
    /// Straight line from the current point.
    LineTo { to: Point },
    /// Quadratic Bézier with a single control point.
    QuadraticBezierTo { control: Point, to: Point },
    /// Cubic Bézier with two control points.
    CubicBezierTo { control1: Point, control2: Point, to: Point },
    /// SVG endpoint-parameterized elliptical arc. `x_axis_rotation` is in degrees.
    EllipticalArcTo {
        to: Point,
        radii: Radii,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
    },
}

impl Segment {
    /// The point this segment ends at, or `None` for [`Segment::Invalid`].
    #[must_use]
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            Segment::Invalid => None,
            Segment::MoveTo { to }
            | Segment::LineTo { to }
            | Segment::QuadraticBezierTo { to, .. }
            | Segment::CubicBezierTo { to, .. }
            | Segment::EllipticalArcTo { to, .. } => Some(to),
        }
    }

    #[must_use]
    pub fn is_move_to(&self) -> bool {
        matches!(self, Segment::MoveTo { .. })
    }

    /// Apply `f` to every point-valued field (end points and control points).
    /// Radii, rotation and arc flags are left alone.
    #[must_use]
    pub fn map_points(self, f: impl Fn(Point) -> Point) -> Segment {
        match self {
            Segment::Invalid => Segment::Invalid,
            Segment::MoveTo { to } => Segment::MoveTo { to: f(to) },
            Segment::LineTo { to } => Segment::LineTo { to: f(to) },
            Segment::QuadraticBezierTo { control, to } => Segment::QuadraticBezierTo { control: f(control), to: f(to) },
            Segment::CubicBezierTo { control1, control2, to } => Segment::CubicBezierTo {
                control1: f(control1),
                control2: f(control2),
                to: f(to),
            },
            Segment::EllipticalArcTo { to, radii, x_axis_rotation, large_arc, sweep } => Segment::EllipticalArcTo {
                to: f(to),
                radii,
                x_axis_rotation,
                large_arc,
                sweep,
            },
        }
    }
}

/// An ordered list of segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    // --- Builders (append-only) ---

    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn move_to(&mut self, to: Point) {
        self.push(Segment::MoveTo { to });
    }

    pub fn line_to(&mut self, to: Point) {
        self.push(Segment::LineTo { to });
    }

    pub fn quadratic_bezier_to(&mut self, control: Point, to: Point) {
        self.push(Segment::QuadraticBezierTo { control, to });
    }

    pub fn cubic_bezier_to(&mut self, control1: Point, control2: Point, to: Point) {
        self.push(Segment::CubicBezierTo { control1, control2, to });
    }

    pub fn elliptical_arc_to(&mut self, to: Point, radii: Radii, x_axis_rotation: f64, large_arc: bool, sweep: bool) {
        self.push(Segment::EllipticalArcTo { to, radii, x_axis_rotation, large_arc, sweep });
    }

    // --- Subpaths ---

    /// Index ranges of each subpath: a run from one `MoveTo` up to the next.
    ///
    /// Segments before the first `MoveTo` form a leading subpath that starts at
    /// the origin.
    #[must_use]
    pub fn subpaths(&self) -> Vec<Range<usize>> {
        let mut ranges = Vec::new();
        let mut start = 0;
        for (idx, segment) in self.segments.iter().enumerate() {
            if segment.is_move_to() && idx > start {
                ranges.push(start..idx);
                start = idx;
            }
        }
        if start < self.segments.len() {
            ranges.push(start..self.segments.len());
        }
        ranges
    }

    /// Whether no subpath would gain a closing line from [`Path::close`].
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.subpaths()
            .into_iter()
            .all(|range| closing_point(&self.segments[range]).is_none())
    }

    /// Append a `LineTo` back to the subpath start for every open subpath.
    ///
    /// The closing line is inserted at the end of its own subpath, so later
    /// subpaths keep their order. Closing a closed path changes nothing.
    pub fn close(&mut self) {
        let ranges = self.subpaths();
        let mut closed = Vec::with_capacity(self.segments.len() + ranges.len());
        for range in ranges {
            let run = &self.segments[range];
            closed.extend_from_slice(run);
            if let Some(start) = closing_point(run) {
                closed.push(Segment::LineTo { to: start });
            }
        }
        self.segments = closed;
    }

    /// A closed copy of this path; `self` is left as authored.
    #[must_use]
    pub fn closed(&self) -> Path {
        let mut path = self.clone();
        path.close();
        path
    }
}

/// Start point of `run` when its last drawn end point does not return to it.
/// A run with nothing drawn after its `MoveTo` has nothing to close.
fn closing_point(run: &[Segment]) -> Option<Point> {
    let start = match run.first() {
        Some(Segment::MoveTo { to }) => *to,
        _ => Point::ORIGIN,
    };
    let last = run
        .iter()
        .filter(|segment| !segment.is_move_to())
        .rev()
        .find_map(Segment::end_point)?;
    if last.approx_eq(start) { None } else { Some(start) }
}

impl FromIterator<Segment> for Path {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self { segments: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
