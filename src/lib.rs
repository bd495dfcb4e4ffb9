//! Viewport transform and path painting for SVG content in a document renderer.
//!
//! A path element's geometry is authored in the coordinate space of the nearest
//! `<svg>` root's `viewBox`. This crate maps that geometry into layout space
//! (uniform scale + origin shift), then paints it onto a [`surface::PaintSurface`]
//! with SVG fill semantics (every subpath implicitly closed, even-odd winding)
//! and stroke semantics (the path exactly as authored).
//!
//! The crate does not walk a DOM. Hosts hand in the authored [`path::Path`], the
//! ancestor viewport through [`element::ViewportSource`], and the ambient
//! [`paint::PaintContext`]; painting never fails, degenerate input only degrades
//! the output.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`geom`] | Points, sizes, rectangles and radii |
//! | [`path`] | Segment sum type, paths and the close operation |
//! | [`outline`] | Lowering paths to backend drawing commands (arcs become cubics) |
//! | [`viewport`] | `viewBox` transform resolution and path rewriting |
//! | [`paint`] | Colors, fill rules, per-element styles and the ambient paint context |
//! | [`surface`] | The paint surface trait, its RAII guard and a recording surface |
//! | [`render`] | The fill/stroke render pipeline |
//! | [`element`] | Path element painting: visibility, paint phase, clip derivation |
//! | [`config`] | Render configuration read from the environment |
//! | [`backend`] | Canvas2D and tiny-skia implementations of the paint surface |
//! | [`consts`] | Shared numeric constants and paint defaults |

pub mod backend;
pub mod config;
pub mod consts;
pub mod element;
pub mod geom;
pub mod outline;
pub mod paint;
pub mod path;
pub mod render;
pub mod surface;
pub mod viewport;
