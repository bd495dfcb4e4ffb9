//! Lowering a [`Path`] to the drawing commands every backend understands.
//!
//! Backends can draw lines, quadratics and cubics but not SVG endpoint arcs, so
//! arcs are converted here to their center parameterization and approximated
//! with cubic Béziers covering at most 90° each.

#[cfg(test)]
#[path = "outline_test.rs"]
mod outline_test;

use std::f64::consts::PI;

use crate::consts::MAX_ARC_SEGMENT_SWEEP;
use crate::geom::{Point, Radii};
use crate::path::{Path, Segment};

/// A drawing command in absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CubicTo(Point, Point, Point),
}

/// The lowered form of a path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    commands: Vec<DrawCommand>,
}

impl Outline {
    /// Lower `path`. `Invalid` segments are skipped and a drawing segment that
    /// appears before any `MoveTo` starts from the origin.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let mut lowering = Lowering { commands: Vec::with_capacity(path.len()), current: None };
        for segment in path {
            match *segment {
                Segment::Invalid => {}
                Segment::MoveTo { to } => lowering.emit(DrawCommand::MoveTo(to), to),
                Segment::LineTo { to } => {
                    lowering.start();
                    lowering.emit(DrawCommand::LineTo(to), to);
                }
                Segment::QuadraticBezierTo { control, to } => {
                    lowering.start();
                    lowering.emit(DrawCommand::QuadTo(control, to), to);
                }
                Segment::CubicBezierTo { control1, control2, to } => {
                    lowering.start();
                    lowering.emit(DrawCommand::CubicTo(control1, control2, to), to);
                }
                Segment::EllipticalArcTo { to, radii, x_axis_rotation, large_arc, sweep } => {
                    let from = lowering.start();
                    let arc = EndpointArc { from, to, radii, x_axis_rotation, large_arc, sweep };
                    lowering.arc(&arc);
                }
            }
        }
        Self { commands: lowering.commands }
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

struct Lowering {
    commands: Vec<DrawCommand>,
    current: Option<Point>,
}

impl Lowering {
    /// Current point, opening a subpath at the origin if none is open yet.
    fn start(&mut self) -> Point {
        match self.current {
            Some(point) => point,
            None => {
                self.emit(DrawCommand::MoveTo(Point::ORIGIN), Point::ORIGIN);
                Point::ORIGIN
            }
        }
    }

    fn emit(&mut self, command: DrawCommand, end: Point) {
        self.commands.push(command);
        self.current = Some(end);
    }

    fn arc(&mut self, arc: &EndpointArc) {
        match arc.center_parameterization() {
            ArcParameterization::Omit => {}
            ArcParameterization::LineTo => self.emit(DrawCommand::LineTo(arc.to), arc.to),
            ArcParameterization::Center { center, radii, theta1, delta_theta } => {
                let pieces = arc_piece_count(delta_theta);
                let step = delta_theta / f64::from(pieces);
                for piece in 0..pieces {
                    let th0 = theta1 + step * f64::from(piece);
                    let (c1, c2, mut to) = arc_segment(center, radii, arc.x_axis_rotation, th0, th0 + step);
                    // Land exactly on the authored end point.
                    if piece + 1 == pieces {
                        to = arc.to;
                    }
                    self.emit(DrawCommand::CubicTo(c1, c2, to), to);
                }
            }
        }
    }
}

/// An elliptical arc in SVG endpoint form, with its start point resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndpointArc {
    pub from: Point,
    pub to: Point,
    pub radii: Radii,
    /// Degrees.
    pub x_axis_rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
}

/// Center form of an arc, or what to draw instead when there is none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArcParameterization {
    Center {
        center: Point,
        /// Radii after out-of-range correction.
        radii: Radii,
        /// Start angle, radians.
        theta1: f64,
        /// Signed sweep, radians; positive when `sweep` is set.
        delta_theta: f64,
    },
    /// Zero radius: draw a straight line to the end point.
    LineTo,
    /// Coincident end points or no solution: draw nothing.
    Omit,
}

impl EndpointArc {
    /// Endpoint to center conversion (SVG 2 implementation notes, B.2.4).
    /// Radii too small to span the end points are scaled up uniformly.
    #[must_use]
    pub fn center_parameterization(&self) -> ArcParameterization {
        let (x1, y1) = (self.from.x, self.from.y);
        let (x2, y2) = (self.to.x, self.to.y);
        let mut rx = self.radii.rx.abs();
        let mut ry = self.radii.ry.abs();

        if rx * rx < f64::EPSILON || ry * ry < f64::EPSILON {
            return ArcParameterization::LineTo;
        }

        let (sin_phi, cos_phi) = self.x_axis_rotation.to_radians().sin_cos();

        // Move the origin to the chord midpoint and align with the ellipse axes.
        let mid_x = (x1 - x2) / 2.0;
        let mid_y = (y1 - y2) / 2.0;
        let x1_ = cos_phi * mid_x + sin_phi * mid_y;
        let y1_ = -sin_phi * mid_x + cos_phi * mid_y;

        let lambda = (x1_ / rx).powi(2) + (y1_ / ry).powi(2);
        if lambda > 1.0 {
            rx *= lambda.sqrt();
            ry *= lambda.sqrt();
        }

        let d = (rx * y1_).powi(2) + (ry * x1_).powi(2);
        if d == 0.0 {
            return ArcParameterization::Omit;
        }
        let mut k = ((rx * ry).powi(2) / d - 1.0).abs().sqrt();
        if self.sweep == self.large_arc {
            k = -k;
        }
        let cx_ = k * rx * y1_ / ry;
        let cy_ = -k * ry * x1_ / rx;

        let center = Point::new(
            cos_phi * cx_ - sin_phi * cy_ + (x1 + x2) / 2.0,
            sin_phi * cx_ + cos_phi * cy_ + (y1 + y2) / 2.0,
        );

        let ux = (x1_ - cx_) / rx;
        let uy = (y1_ - cy_) / ry;
        let u_len = ux.hypot(uy);
        let vx = (-x1_ - cx_) / rx;
        let vy = (-y1_ - cy_) / ry;
        let v_len = vx.hypot(vy);
        if u_len == 0.0 || v_len == 0.0 {
            return ArcParameterization::Omit;
        }

        let mut theta1 = (ux / u_len).clamp(-1.0, 1.0).acos();
        if uy < 0.0 {
            theta1 = -theta1;
        }

        let mut delta_theta = ((ux * vx + uy * vy) / (u_len * v_len)).clamp(-1.0, 1.0).acos();
        if ux * vy - uy * vx < 0.0 {
            delta_theta = -delta_theta;
        }
        if self.sweep && delta_theta < 0.0 {
            delta_theta += 2.0 * PI;
        } else if !self.sweep && delta_theta > 0.0 {
            delta_theta -= 2.0 * PI;
        }

        if delta_theta.abs() < f64::EPSILON {
            return ArcParameterization::LineTo;
        }

        ArcParameterization::Center { center, radii: Radii::new(rx, ry), theta1, delta_theta }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn arc_piece_count(delta_theta: f64) -> u32 {
    ((delta_theta.abs() / MAX_ARC_SEGMENT_SWEEP).ceil() as u32).max(1)
}

/// Cubic approximation of the ellipse arc from `th0` to `th1`, returned as
/// (control 1, control 2, end).
fn arc_segment(center: Point, radii: Radii, x_axis_rotation: f64, th0: f64, th1: f64) -> (Point, Point, Point) {
    let (sin_phi, cos_phi) = x_axis_rotation.to_radians().sin_cos();
    let (sin_th0, cos_th0) = th0.sin_cos();
    let (sin_th1, cos_th1) = th1.sin_cos();

    let th_half = 0.5 * (th1 - th0);
    let t = (8.0 / 3.0) * (th_half * 0.5).sin().powi(2) / th_half.sin();
    let x1 = radii.rx * (cos_th0 - t * sin_th0);
    let y1 = radii.ry * (sin_th0 + t * cos_th0);
    let x3 = radii.rx * cos_th1;
    let y3 = radii.ry * sin_th1;
    let x2 = x3 + radii.rx * (t * sin_th1);
    let y2 = y3 + radii.ry * (-t * cos_th1);

    let place = |x: f64, y: f64| Point::new(center.x + cos_phi * x - sin_phi * y, center.y + sin_phi * x + cos_phi * y);
    (place(x1, y1), place(x2, y2), place(x3, y3))
}
