//! Canvas2D paint surface.
//!
//! This is the only module that touches [`web_sys::CanvasRenderingContext2d`].
//! Canvas2D clips can only be narrowed, never replaced, so a clip lasts until
//! the `restore` matching the `save` that preceded it.

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, CanvasWindingRule, Path2d};

use crate::geom::{Point, Rect};
use crate::outline::{DrawCommand, Outline};
use crate::paint::{Color, FillRule};
use crate::path::Path;
use crate::surface::{PaintSurface, SurfaceError};

impl From<JsValue> for SurfaceError {
    fn from(err: JsValue) -> Self {
        Self::Canvas(format!("{err:?}"))
    }
}

/// Paint surface over a borrowed 2D context.
pub struct Canvas2dSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
    // Translation applied since the innermost open `save`, and the values for
    // the enclosing saves. Needed to rebuild the transform when a clip is
    // cleared.
    offset: Point,
    saved: Vec<Point>,
}

impl<'a> Canvas2dSurface<'a> {
    #[must_use]
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx, offset: Point::ORIGIN, saved: Vec::new() }
    }
}

fn build_path_2d(path: &Path) -> Result<Path2d, SurfaceError> {
    let path2d = Path2d::new()?;
    for command in Outline::from_path(path).commands() {
        match *command {
            DrawCommand::MoveTo(p) => path2d.move_to(p.x, p.y),
            DrawCommand::LineTo(p) => path2d.line_to(p.x, p.y),
            DrawCommand::QuadTo(c, p) => path2d.quadratic_curve_to(c.x, c.y, p.x, p.y),
            DrawCommand::CubicTo(c1, c2, p) => path2d.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
        }
    }
    Ok(path2d)
}

fn winding_rule(rule: FillRule) -> CanvasWindingRule {
    match rule {
        FillRule::EvenOdd => CanvasWindingRule::Evenodd,
        FillRule::NonZero => CanvasWindingRule::Nonzero,
    }
}

impl PaintSurface for Canvas2dSurface<'_> {
    fn save(&mut self) {
        self.ctx.save();
        self.saved.push(self.offset);
        self.offset = Point::ORIGIN;
    }

    fn restore(&mut self) {
        let Some(offset) = self.saved.pop() else {
            tracing::warn!("restore without matching save");
            return;
        };
        self.offset = offset;
        self.ctx.restore();
    }

    fn translate(&mut self, offset: Point) -> Result<(), SurfaceError> {
        self.ctx.translate(offset.x, offset.y)?;
        self.offset = self.offset.translated(offset.x, offset.y);
        Ok(())
    }

    fn set_clip_rect(&mut self, rect: Rect) -> Result<(), SurfaceError> {
        self.ctx.begin_path();
        self.ctx.rect(rect.x, rect.y, rect.width, rect.height);
        self.ctx.clip();
        Ok(())
    }

    fn clear_clip(&mut self) {
        if self.saved.is_empty() {
            tracing::debug!("no saved state to clear a clip against");
            return;
        }
        // Back to the last save, then reopen it and replay its translation.
        self.ctx.restore();
        self.ctx.save();
        if let Err(err) = self.ctx.translate(self.offset.x, self.offset.y) {
            tracing::warn!(error = ?err, "could not replay translation after clearing clip");
            self.offset = Point::ORIGIN;
        }
    }

    fn fill_path(&mut self, path: &Path, color: Color, rule: FillRule) -> Result<(), SurfaceError> {
        let path2d = build_path_2d(path)?;
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_with_path_2d_and_winding(&path2d, winding_rule(rule));
        Ok(())
    }

    fn stroke_path(&mut self, path: &Path, color: Color, width: f64) -> Result<(), SurfaceError> {
        let path2d = build_path_2d(path)?;
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width);
        self.ctx.stroke_with_path(&path2d);
        Ok(())
    }
}
