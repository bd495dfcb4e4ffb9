//! CPU paint surface backed by a tiny-skia [`Pixmap`].
//!
//! Surface state is a transform plus an optional clip mask. Clip rectangles
//! are rasterized into the mask in device space when they are set, so a later
//! `translate` does not move an existing clip.

#[cfg(test)]
#[path = "raster_test.rs"]
mod raster_test;

use tiny_skia::{Mask, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::config::RenderConfig;
use crate::geom::{Point, Rect};
use crate::outline::{DrawCommand, Outline};
use crate::paint::{Color, FillRule};
use crate::path::Path;
use crate::surface::{PaintSurface, SurfaceError};

#[derive(Clone)]
struct RasterState {
    transform: Transform,
    clip: Option<Mask>,
}

/// Paint surface that rasterizes into an owned pixmap.
pub struct RasterSurface {
    pixmap: Pixmap,
    anti_alias: bool,
    state: RasterState,
    saved: Vec<RasterState>,
}

impl RasterSurface {
    /// A transparent `width` x `height` surface.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::Allocation`] for a zero or oversized dimension.
    pub fn new(width: u32, height: u32, config: &RenderConfig) -> Result<Self, SurfaceError> {
        let pixmap = Pixmap::new(width, height).ok_or(SurfaceError::Allocation { width, height })?;
        Ok(Self {
            pixmap,
            anti_alias: config.anti_alias,
            state: RasterState { transform: Transform::identity(), clip: None },
            saved: Vec::new(),
        })
    }

    #[must_use]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    #[must_use]
    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    fn paint(&self, color: Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = self.anti_alias;
        paint
    }
}

#[allow(clippy::cast_possible_truncation)]
fn to_f32(v: f64) -> f32 {
    v as f32
}

// `None` when the path has nothing to draw.
fn build_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for command in Outline::from_path(path).commands() {
        match *command {
            DrawCommand::MoveTo(p) => pb.move_to(to_f32(p.x), to_f32(p.y)),
            DrawCommand::LineTo(p) => pb.line_to(to_f32(p.x), to_f32(p.y)),
            DrawCommand::QuadTo(c, p) => pb.quad_to(to_f32(c.x), to_f32(c.y), to_f32(p.x), to_f32(p.y)),
            DrawCommand::CubicTo(c1, c2, p) => pb.cubic_to(
                to_f32(c1.x),
                to_f32(c1.y),
                to_f32(c2.x),
                to_f32(c2.y),
                to_f32(p.x),
                to_f32(p.y),
            ),
        }
    }
    pb.finish()
}

fn sk_fill_rule(rule: FillRule) -> tiny_skia::FillRule {
    match rule {
        FillRule::EvenOdd => tiny_skia::FillRule::EvenOdd,
        FillRule::NonZero => tiny_skia::FillRule::Winding,
    }
}

impl PaintSurface for RasterSurface {
    fn save(&mut self) {
        self.saved.push(self.state.clone());
    }

    fn restore(&mut self) {
        match self.saved.pop() {
            Some(state) => self.state = state,
            None => tracing::warn!("restore without matching save"),
        }
    }

    fn translate(&mut self, offset: Point) -> Result<(), SurfaceError> {
        self.state.transform = self.state.transform.pre_translate(to_f32(offset.x), to_f32(offset.y));
        Ok(())
    }

    fn set_clip_rect(&mut self, rect: Rect) -> Result<(), SurfaceError> {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let Some(sk_rect) =
            tiny_skia::Rect::from_xywh(to_f32(rect.x), to_f32(rect.y), to_f32(rect.width), to_f32(rect.height))
        else {
            // Nothing survives an empty clip.
            tracing::debug!(?rect, "clip rect has no area");
            self.state.clip = Some(Mask::new(width, height).ok_or(SurfaceError::Allocation { width, height })?);
            return Ok(());
        };
        let clip_path = PathBuilder::from_rect(sk_rect);
        let transform = self.state.transform;

        match self.state.clip.as_mut() {
            Some(mask) => mask.intersect_path(&clip_path, tiny_skia::FillRule::Winding, self.anti_alias, transform),
            None => {
                let mut mask = Mask::new(width, height).ok_or(SurfaceError::Allocation { width, height })?;
                mask.fill_path(&clip_path, tiny_skia::FillRule::Winding, self.anti_alias, transform);
                self.state.clip = Some(mask);
            }
        }
        Ok(())
    }

    fn clear_clip(&mut self) {
        self.state.clip = self.saved.last().and_then(|state| state.clip.clone());
    }

    fn fill_path(&mut self, path: &Path, color: Color, rule: FillRule) -> Result<(), SurfaceError> {
        let Some(sk_path) = build_path(path) else {
            return Ok(());
        };
        let paint = self.paint(color);
        self.pixmap
            .fill_path(&sk_path, &paint, sk_fill_rule(rule), self.state.transform, self.state.clip.as_ref());
        Ok(())
    }

    fn stroke_path(&mut self, path: &Path, color: Color, width: f64) -> Result<(), SurfaceError> {
        let Some(sk_path) = build_path(path) else {
            return Ok(());
        };
        let paint = self.paint(color);
        let stroke = Stroke { width: to_f32(width), ..Stroke::default() };
        self.pixmap
            .stroke_path(&sk_path, &paint, &stroke, self.state.transform, self.state.clip.as_ref());
        Ok(())
    }
}
