//! Concrete [`PaintSurface`](crate::surface::PaintSurface) implementations.
//!
//! - [`canvas2d`]: a browser `CanvasRenderingContext2d`, for the wasm build.
//! - [`raster`]: a CPU pixmap rendered with tiny-skia, for native hosts and
//!   pixel tests.

pub mod canvas2d;
pub mod raster;
