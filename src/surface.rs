//! The paint surface seam between the render pipeline and a concrete backend.
//!
//! Surface state (translation and clip) is shared and mutable, so every
//! element's render call brackets its changes with a [`SurfaceGuard`]: state is
//! saved when the guard is created and restored when it drops, on every exit
//! path.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use std::ops::{Deref, DerefMut};

use serde::Serialize;

use crate::geom::{Point, Rect};
use crate::paint::{Color, FillRule};
use crate::path::Path;

/// Error returned by fallible [`PaintSurface`] calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// A Canvas2D call threw; carries the debug form of the JS exception.
    #[error("canvas call failed: {0}")]
    Canvas(String),
    /// A raster buffer or clip mask could not be allocated.
    #[error("could not allocate {width}x{height} raster target")]
    Allocation { width: u32, height: u32 },
}

/// Drawing operations the render pipeline needs from a backend.
///
/// `save`/`restore` nest; `restore` returns translation and clip to what they
/// were at the matching `save`. Coordinates passed to drawing calls are in the
/// current (translated) space.
pub trait PaintSurface {
    fn save(&mut self);

    fn restore(&mut self);

    /// Shift the coordinate space by `offset`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backend rejects the transform.
    fn translate(&mut self, offset: Point) -> Result<(), SurfaceError>;

    /// Narrow the clip to `rect`, given in the current coordinate space. The
    /// result is the intersection with any clip already in effect.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backend cannot build the clip.
    fn set_clip_rect(&mut self, rect: Rect) -> Result<(), SurfaceError>;

    /// Drop any clip set since the last `save`.
    fn clear_clip(&mut self);

    /// Fill `path` as given; callers close it first when fill semantics need it.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backend fails to rasterize.
    fn fill_path(&mut self, path: &Path, color: Color, rule: FillRule) -> Result<(), SurfaceError>;

    /// Stroke `path` with a line of `width` layout units.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the backend fails to rasterize.
    fn stroke_path(&mut self, path: &Path, color: Color, width: f64) -> Result<(), SurfaceError>;
}

/// Scoped surface state: saves on creation, restores on drop.
pub struct SurfaceGuard<'a, S: PaintSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: PaintSurface + ?Sized> SurfaceGuard<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: PaintSurface + ?Sized> Deref for SurfaceGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &Self::Target {
        self.surface
    }
}

impl<S: PaintSurface + ?Sized> DerefMut for SurfaceGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.surface
    }
}

impl<S: PaintSurface + ?Sized> Drop for SurfaceGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

/// One call made against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SurfaceOp {
    Save,
    Restore,
    Translate { offset: Point },
    SetClip { rect: Rect },
    ClearClip,
    Fill { path: Path, color: Color, rule: FillRule },
    Stroke { path: Path, color: Color, width: f64 },
}

/// A surface that records calls instead of drawing. Used for tests and for
/// dumping what a paint pass would do.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
    depth: usize,
    failing: bool,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface whose fallible calls all return [`SurfaceError::Canvas`]
    /// (after recording them).
    #[must_use]
    pub fn failing() -> Self {
        Self { failing: true, ..Self::default() }
    }

    #[must_use]
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Current `save` nesting depth; zero when every save was restored.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Paths filled so far, with their color and rule.
    pub fn fills(&self) -> impl Iterator<Item = (&Path, Color, FillRule)> {
        self.ops.iter().filter_map(|op| match op {
            SurfaceOp::Fill { path, color, rule } => Some((path, *color, *rule)),
            _ => None,
        })
    }

    /// Paths stroked so far, with their color and width.
    pub fn strokes(&self) -> impl Iterator<Item = (&Path, Color, f64)> {
        self.ops.iter().filter_map(|op| match op {
            SurfaceOp::Stroke { path, color, width } => Some((path, *color, *width)),
            _ => None,
        })
    }

    /// The recorded calls as JSON.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a recorded value cannot be represented in JSON
    /// (non-finite coordinates).
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(&self.ops)
    }

    fn record(&mut self, op: SurfaceOp) -> Result<(), SurfaceError> {
        self.ops.push(op);
        if self.failing {
            return Err(SurfaceError::Canvas("recording surface set to fail".into()));
        }
        Ok(())
    }
}

impl PaintSurface for RecordingSurface {
    fn save(&mut self) {
        self.ops.push(SurfaceOp::Save);
        self.depth += 1;
    }

    fn restore(&mut self) {
        if self.depth == 0 {
            tracing::warn!("restore without matching save");
        }
        self.ops.push(SurfaceOp::Restore);
        self.depth = self.depth.saturating_sub(1);
    }

    fn translate(&mut self, offset: Point) -> Result<(), SurfaceError> {
        self.record(SurfaceOp::Translate { offset })
    }

    fn set_clip_rect(&mut self, rect: Rect) -> Result<(), SurfaceError> {
        self.record(SurfaceOp::SetClip { rect })
    }

    fn clear_clip(&mut self) {
        self.ops.push(SurfaceOp::ClearClip);
    }

    fn fill_path(&mut self, path: &Path, color: Color, rule: FillRule) -> Result<(), SurfaceError> {
        self.record(SurfaceOp::Fill { path: path.clone(), color, rule })
    }

    fn stroke_path(&mut self, path: &Path, color: Color, width: f64) -> Result<(), SurfaceError> {
        self.record(SurfaceOp::Stroke { path: path.clone(), color, width })
    }
}
