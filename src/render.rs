//! The path render pipeline: viewport rewrite, clip, fill pass, stroke pass.
//!
//! Fill and stroke need different paths. Filling treats every subpath as
//! closed, so the fill pass paints a closed copy; stroking must draw exactly
//! what was authored, so the stroke pass paints the path as given (after the
//! viewport rewrite). Nothing here fails: surface errors are logged and the
//! element is left partially painted.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::config::RenderConfig;
use crate::geom::{Point, Rect};
use crate::paint::ResolvedPaint;
use crate::path::Path;
use crate::surface::{PaintSurface, SurfaceError, SurfaceGuard};
use crate::viewport::ViewportTransform;

/// Where an element paints on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintTarget {
    /// Absolute layout position the path's coordinates are relative to.
    pub offset: Point,
    /// Clip rectangle in absolute layout coordinates.
    pub clip: Rect,
}

/// Paint `path` onto `surface`.
///
/// Steps, in order: rewrite the path through `transform` (skipped for the
/// identity), clip to `target.clip`, translate by `target.offset`, fill a
/// closed copy with `config.fill_rule`, stroke the unclosed path. Surface
/// state is restored before returning. An absent paint channel skips its pass.
pub fn render<S: PaintSurface + ?Sized>(
    surface: &mut S,
    path: &Path,
    transform: &ViewportTransform,
    target: &PaintTarget,
    paint: &ResolvedPaint,
    config: &RenderConfig,
) {
    if path.is_empty() {
        tracing::debug!("empty path; nothing to paint");
        return;
    }
    if target.clip.is_empty() {
        tracing::debug!(clip = ?target.clip, "clip has no area; nothing to paint");
        return;
    }

    let transformed;
    let path = if transform.is_identity() {
        path
    } else {
        tracing::debug!(scale = transform.scale, origin = ?transform.origin, "applying viewport transform");
        transformed = transform.apply_to_path(path, config.arc_flags);
        &transformed
    };

    if let Err(err) = paint_passes(surface, path, target, paint, config) {
        tracing::warn!(error = %err, "could not set up surface for path; skipped");
    }
}

fn paint_passes<S: PaintSurface + ?Sized>(
    surface: &mut S,
    path: &Path,
    target: &PaintTarget,
    paint: &ResolvedPaint,
    config: &RenderConfig,
) -> Result<(), SurfaceError> {
    let mut surface = SurfaceGuard::new(surface);
    surface.set_clip_rect(target.clip)?;
    surface.translate(target.offset)?;

    match paint.fill_color() {
        Some(color) => {
            let closed = path.closed();
            if let Err(err) = surface.fill_path(&closed, color, config.fill_rule) {
                tracing::warn!(error = %err, "fill pass failed");
            }
        }
        None => tracing::debug!("no fill paint; skipping fill pass"),
    }

    match paint.stroke_paint() {
        Some((color, width)) => {
            if let Err(err) = surface.stroke_path(path, color, width) {
                tracing::warn!(error = %err, "stroke pass failed");
            }
        }
        None => tracing::debug!("no stroke paint; skipping stroke pass"),
    }

    Ok(())
}
